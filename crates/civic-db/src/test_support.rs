//! Shared test utilities for civic-db unit tests.

use civic_core::entities::NewIssue;

use crate::CivicDb;
use crate::service::CivicService;

/// In-memory service with a fresh schema.
pub async fn test_service() -> CivicService {
    CivicService::from_db(CivicDb::open_local(":memory:").await.unwrap())
}

/// Minimal valid create payload.
pub fn new_issue(title: &str) -> NewIssue {
    NewIssue {
        title: title.into(),
        description: format!("{title} (details)"),
        category: "Pothole".into(),
        ..Default::default()
    }
}
