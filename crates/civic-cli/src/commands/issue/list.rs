use civic_config::CivicConfig;
use civic_core::entities::Issue;
use civic_db::repos::IssueFilter;
use civic_db::service::CivicService;

use crate::cli::GlobalFlags;
use crate::output::output_issues;

#[derive(Debug, Default)]
pub struct ListArgs {
    pub status: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub owner: Option<String>,
    pub limit: Option<u32>,
}

pub async fn handle(
    store: &CivicService,
    args: &ListArgs,
    config: &CivicConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    // The subcommand's --limit wins over the global one.
    let limit = config.general.resolve_limit(args.limit.or(flags.limit));
    let issues = run(store, args, limit).await?;
    output_issues(&issues, flags.format)
}

async fn run(store: &CivicService, args: &ListArgs, limit: u32) -> anyhow::Result<Vec<Issue>> {
    let filter = IssueFilter {
        status: args.status.as_deref().map(str::parse).transpose()?,
        category: args.category.clone(),
        priority: args.priority.as_deref().map(str::parse).transpose()?,
        owner_id: args.owner.clone(),
        limit: Some(limit),
    };
    Ok(store.list_issues(&filter).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use civic_core::entities::NewIssue;
    use civic_core::enums::Priority;

    async fn seeded() -> (tempfile::TempDir, CivicService) {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("civic.db");
        let store = CivicService::new_local(path.to_str().unwrap()).await.unwrap();
        for (title, priority, owner) in [
            ("Pothole", Priority::High, "u1"),
            ("Graffiti", Priority::Low, "u2"),
            ("Streetlight out", Priority::High, "u2"),
        ] {
            let new = NewIssue {
                title: title.into(),
                description: format!("{title} on Main St"),
                category: "roads".into(),
                priority: Some(priority),
                ..NewIssue::default()
            };
            store.create_issue(owner, new).await.unwrap();
        }
        (dir, store)
    }

    #[tokio::test]
    async fn filters_combine() {
        let (_dir, store) = seeded().await;
        let args = ListArgs {
            priority: Some("high".into()),
            owner: Some("u2".into()),
            ..ListArgs::default()
        };
        let issues = run(&store, &args, 20).await.unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].title, "Streetlight out");
    }

    #[tokio::test]
    async fn limit_caps_results() {
        let (_dir, store) = seeded().await;
        let issues = run(&store, &ListArgs::default(), 2).await.unwrap();
        assert_eq!(issues.len(), 2);
    }

    #[tokio::test]
    async fn unknown_status_is_rejected() {
        let (_dir, store) = seeded().await;
        let args = ListArgs {
            status: Some("pending".into()),
            ..ListArgs::default()
        };
        assert!(run(&store, &args, 20).await.is_err());
    }
}
