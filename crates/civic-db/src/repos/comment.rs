//! Comment repository. Comments are only ever read as part of their issue.

use chrono::{SubsecRound, Utc};

use civic_core::entities::{Comment, Issue};
use civic_core::ids::PREFIX_COMMENT;

use crate::error::DatabaseError;
use crate::helpers::{format_datetime, parse_datetime};
use crate::service::CivicService;

const SELECT_COLS: &str = "id, user_id, text, created_at";

fn row_to_comment(row: &libsql::Row) -> Result<Comment, DatabaseError> {
    Ok(Comment {
        id: row.get(0)?,
        user_id: row.get(1)?,
        text: row.get(2)?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
    })
}

impl CivicService {
    /// Append a comment and return the issue with all of its comments.
    ///
    /// # Errors
    ///
    /// `DatabaseError::Validation` for blank text, `DatabaseError::NotFound`
    /// if the issue does not exist.
    pub async fn add_comment(&self, issue_id: &str, user_id: &str, text: &str) -> Result<Issue, DatabaseError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DatabaseError::Validation("Comment text is required".into()));
        }

        let now = format_datetime(Utc::now().trunc_subsecs(6));
        let id = self.db().generate_id(PREFIX_COMMENT).await?;

        {
            let _write = self.db().write_guard().await;
            let tx = self.db().conn().transaction().await?;
            let touched = tx
                .execute(
                    "UPDATE issues SET updated_at = ?1 WHERE id = ?2",
                    libsql::params![now.as_str(), issue_id],
                )
                .await?;
            if touched == 0 {
                tx.rollback().await?;
                return Err(DatabaseError::issue_not_found(issue_id));
            }
            tx.execute(
                "INSERT INTO issue_comments (id, issue_id, user_id, text, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
                libsql::params![id.as_str(), issue_id, user_id, text, now.as_str()],
            )
            .await?;
            tx.commit().await?;
        }

        tracing::info!(id = %id, issue = issue_id, user = user_id, "comment added");
        self.get_issue(issue_id).await
    }

    /// Comments on one issue, oldest first.
    ///
    /// # Errors
    ///
    /// Any libSQL failure or an undecodable row.
    pub async fn list_comments(&self, issue_id: &str) -> Result<Vec<Comment>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM issue_comments WHERE issue_id = ?1 ORDER BY created_at, rowid"
                ),
                [issue_id],
            )
            .await?;
        let mut comments = Vec::new();
        while let Some(row) = rows.next().await? {
            comments.push(row_to_comment(&row)?);
        }
        Ok(comments)
    }

    /// Fill `comments` on every issue with one query.
    pub(crate) async fn attach_comments(&self, issues: &mut [Issue]) -> Result<(), DatabaseError> {
        if issues.is_empty() {
            return Ok(());
        }
        let placeholders: Vec<String> = (1..=issues.len()).map(|i| format!("?{i}")).collect();
        let sql = format!(
            "SELECT issue_id, {SELECT_COLS} FROM issue_comments WHERE issue_id IN ({}) ORDER BY created_at, rowid",
            placeholders.join(", ")
        );
        let params: Vec<libsql::Value> = issues.iter().map(|i| i.id.clone().into()).collect();
        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;

        while let Some(row) = rows.next().await? {
            let issue_id: String = row.get(0)?;
            let comment = Comment {
                id: row.get(1)?,
                user_id: row.get(2)?,
                text: row.get(3)?,
                created_at: parse_datetime(&row.get::<String>(4)?)?,
            };
            if let Some(issue) = issues.iter_mut().find(|i| i.id == issue_id) {
                issue.comments.push(comment);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::IssueFilter;
    use crate::test_support::{new_issue, test_service};

    #[tokio::test]
    async fn add_comment_returns_issue_with_comments_in_order() {
        let svc = test_service().await;
        let issue = svc.create_issue("u1", new_issue("Broken bench")).await.unwrap();

        svc.add_comment(&issue.id, "u2", "Seen it too").await.unwrap();
        let updated = svc.add_comment(&issue.id, "u3", "  Still broken  ").await.unwrap();

        let texts: Vec<&str> = updated.comments.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["Seen it too", "Still broken"]);
        assert_eq!(updated.comments[1].user_id, "u3");
        assert!(updated.comments.iter().all(|c| c.id.starts_with("cmt-")));
        assert!(updated.updated_at >= issue.updated_at);
    }

    #[tokio::test]
    async fn blank_comment_is_rejected() {
        let svc = test_service().await;
        let issue = svc.create_issue("u1", new_issue("Leak")).await.unwrap();
        let result = svc.add_comment(&issue.id, "u2", " \n\t ").await;
        assert!(matches!(result, Err(DatabaseError::Validation(_))));
        assert!(svc.get_issue(&issue.id).await.unwrap().comments.is_empty());
    }

    #[tokio::test]
    async fn comment_on_missing_issue_is_not_found() {
        let svc = test_service().await;
        let result = svc.add_comment("iss-deadbeef", "u2", "hello").await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }

    #[tokio::test]
    async fn list_attaches_comments_to_the_right_issue() {
        let svc = test_service().await;
        let a = svc.create_issue("u1", new_issue("A")).await.unwrap();
        let b = svc.create_issue("u1", new_issue("B")).await.unwrap();
        svc.add_comment(&b.id, "u2", "on b").await.unwrap();

        let listed = svc.list_issues(&IssueFilter::default()).await.unwrap();
        let find = |id: &str| listed.iter().find(|i| i.id == id).unwrap();
        assert!(find(&a.id).comments.is_empty());
        assert_eq!(find(&b.id).comments.len(), 1);
    }

    #[tokio::test]
    async fn deleting_issue_cascades_to_comments() {
        let svc = test_service().await;
        let issue = svc.create_issue("u1", new_issue("Temp")).await.unwrap();
        svc.add_comment(&issue.id, "u2", "note").await.unwrap();
        svc.delete_issue(&issue.id).await.unwrap();

        let mut rows = svc
            .db()
            .conn()
            .query("SELECT count(*) FROM issue_comments", ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<i64>(0).unwrap(), 0);
    }
}
