use civic_db::service::CivicService;

use crate::cli::GlobalFlags;
use crate::output::output;

pub async fn handle(store: &CivicService, id: &str, flags: &GlobalFlags) -> anyhow::Result<()> {
    let issue = store.get_issue(id).await?;
    output(&issue, flags.format)
}
