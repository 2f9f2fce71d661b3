mod get;
mod list;
mod query;

use civic_config::CivicConfig;
use civic_db::service::CivicService;

use crate::cli::{GlobalFlags, IssueCommands};

/// Handle `civic issue`.
pub async fn handle(action: IssueCommands, config: &CivicConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        IssueCommands::Query {
            file,
            search,
            status,
            sort,
        } => query::handle(&file, search.as_deref(), status.as_deref(), sort.as_deref(), flags),
        IssueCommands::List {
            status,
            category,
            priority,
            owner,
            limit,
        } => {
            let store = open_store(config).await?;
            let args = list::ListArgs {
                status,
                category,
                priority,
                owner,
                limit,
            };
            list::handle(&store, &args, config, flags).await
        }
        IssueCommands::Get { id } => {
            let store = open_store(config).await?;
            get::handle(&store, &id, flags).await
        }
    }
}

async fn open_store(config: &CivicConfig) -> anyhow::Result<CivicService> {
    let path = &config.database.path;
    CivicService::new_local(path)
        .await
        .map_err(|e| anyhow::anyhow!("failed to open issue store at {path}: {e}"))
}
