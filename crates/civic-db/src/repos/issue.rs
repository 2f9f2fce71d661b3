//! Issue repository: create, read, filtered list, partial update, delete.

use chrono::{SubsecRound, Utc};

use civic_core::entities::{Issue, NewIssue};
use civic_core::enums::{IssueStatus, Priority};
use civic_core::ids::PREFIX_ISSUE;

use crate::error::DatabaseError;
use crate::helpers::{
    format_datetime, get_opt_f64, get_opt_string, opt_real, opt_text, parse_datetime, parse_enum,
};
use crate::service::CivicService;
use crate::updates::issue::IssueUpdate;

const SELECT_COLS: &str = "id, title, description, category, status, priority, location, \
     latitude, longitude, image, owner_id, created_at, updated_at";

fn row_to_issue(row: &libsql::Row) -> Result<Issue, DatabaseError> {
    Ok(Issue {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        category: row.get(3)?,
        status: parse_enum(&row.get::<String>(4)?)?,
        priority: parse_enum(&row.get::<String>(5)?)?,
        location: get_opt_string(row, 6)?,
        latitude: get_opt_f64(row, 7)?,
        longitude: get_opt_f64(row, 8)?,
        image: get_opt_string(row, 9)?,
        owner_id: get_opt_string(row, 10)?,
        comments: Vec::new(),
        created_at: parse_datetime(&row.get::<String>(11)?)?,
        updated_at: Some(parse_datetime(&row.get::<String>(12)?)?),
    })
}

/// Exact-match storage filters. `None` means unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueFilter {
    pub status: Option<IssueStatus>,
    pub category: Option<String>,
    pub priority: Option<Priority>,
    pub owner_id: Option<String>,
    pub limit: Option<u32>,
}

impl IssueFilter {
    /// Only issues reported by `owner_id`.
    #[must_use]
    pub fn owned_by(owner_id: impl Into<String>) -> Self {
        Self {
            owner_id: Some(owner_id.into()),
            ..Self::default()
        }
    }

    /// `WHERE` fragment and bound values, placeholders numbered from `?1`.
    fn to_sql(&self) -> (String, Vec<libsql::Value>) {
        let mut clauses = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        let mut push = |column: &str, value: libsql::Value| {
            params.push(value);
            clauses.push(format!("{column} = ?{}", params.len()));
        };
        if let Some(status) = self.status {
            push("status", status.as_str().into());
        }
        if let Some(ref category) = self.category {
            push("category", category.clone().into());
        }
        if let Some(priority) = self.priority {
            push("priority", priority.as_str().into());
        }
        if let Some(ref owner_id) = self.owner_id {
            push("owner_id", owner_id.clone().into());
        }

        let where_clause = if clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", clauses.join(" AND "))
        };
        (where_clause, params)
    }
}

impl CivicService {
    /// Persist a freshly reported issue owned by `owner_id`.
    ///
    /// # Errors
    ///
    /// `DatabaseError::Validation` if the payload is incomplete, otherwise
    /// any libSQL failure.
    pub async fn create_issue(&self, owner_id: &str, new: NewIssue) -> Result<Issue, DatabaseError> {
        new.validate()?;
        // Storage keeps microseconds.
        let now = Utc::now().trunc_subsecs(6);
        let id = self.db().generate_id(PREFIX_ISSUE).await?;
        let issue = Issue::from_new(id, owner_id, new, now);
        let stamp = format_datetime(now);

        let _write = self.db().write_guard().await;
        self.db()
            .conn()
            .execute(
                "INSERT INTO issues (id, title, description, category, status, priority, location, latitude, longitude, image, owner_id, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                libsql::params_from_iter(vec![
                    libsql::Value::from(issue.id.as_str()),
                    issue.title.as_str().into(),
                    issue.description.as_str().into(),
                    issue.category.as_str().into(),
                    issue.status.as_str().into(),
                    issue.priority.as_str().into(),
                    opt_text(issue.location.as_deref()),
                    opt_real(issue.latitude),
                    opt_real(issue.longitude),
                    opt_text(issue.image.as_deref()),
                    opt_text(issue.owner_id.as_deref()),
                    stamp.as_str().into(),
                    stamp.as_str().into(),
                ]),
            )
            .await?;

        tracing::info!(id = %issue.id, owner = owner_id, category = %issue.category, "issue created");
        Ok(issue)
    }

    /// Fetch one issue with its comments, oldest comment first.
    ///
    /// # Errors
    ///
    /// `DatabaseError::NotFound` if no issue has this id.
    pub async fn get_issue(&self, id: &str) -> Result<Issue, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM issues WHERE id = ?1"), [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::issue_not_found(id))?;
        let mut issue = row_to_issue(&row)?;
        issue.comments = self.list_comments(id).await?;
        Ok(issue)
    }

    /// Issues matching every set filter, newest first, comments attached.
    ///
    /// # Errors
    ///
    /// Any libSQL failure or an undecodable row.
    pub async fn list_issues(&self, filter: &IssueFilter) -> Result<Vec<Issue>, DatabaseError> {
        let (where_clause, params) = filter.to_sql();
        let limit = filter
            .limit
            .map_or_else(String::new, |n| format!(" LIMIT {n}"));
        let sql = format!(
            "SELECT {SELECT_COLS} FROM issues {where_clause} ORDER BY created_at DESC, rowid DESC{limit}"
        );
        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;

        let mut issues = Vec::new();
        while let Some(row) = rows.next().await? {
            issues.push(row_to_issue(&row)?);
        }
        self.attach_comments(&mut issues).await?;
        tracing::debug!(?filter, count = issues.len(), "issues listed");
        Ok(issues)
    }

    /// Apply a partial update. An empty update returns the current record.
    ///
    /// # Errors
    ///
    /// `DatabaseError::NotFound` for an unknown id, `DatabaseError::Validation`
    /// for a blank required field or out-of-range coordinates.
    pub async fn update_issue(&self, issue_id: &str, update: IssueUpdate) -> Result<Issue, DatabaseError> {
        update.validate()?;
        if update.is_empty() {
            return self.get_issue(issue_id).await;
        }

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut set = |column: &str, value: libsql::Value| {
            params.push(value);
            sets.push(format!("{column} = ?{}", params.len()));
        };

        if let Some(ref title) = update.title {
            set("title", title.clone().into());
        }
        if let Some(ref description) = update.description {
            set("description", description.clone().into());
        }
        if let Some(ref category) = update.category {
            set("category", category.clone().into());
        }
        if let Some(ref location) = update.location {
            set("location", location.clone().into());
        }
        if let Some(latitude) = update.latitude {
            set("latitude", libsql::Value::Real(latitude));
        }
        if let Some(longitude) = update.longitude {
            set("longitude", libsql::Value::Real(longitude));
        }
        if let Some(ref image) = update.image {
            set("image", image.clone().into());
        }
        if let Some(status) = update.status {
            set("status", status.as_str().into());
        }
        if let Some(priority) = update.priority {
            set("priority", priority.as_str().into());
        }
        set("updated_at", format_datetime(Utc::now()).into());

        params.push(issue_id.into());
        let sql = format!("UPDATE issues SET {} WHERE id = ?{}", sets.join(", "), params.len());
        let write = self.db().write_guard().await;
        let changed = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        drop(write);
        if changed == 0 {
            return Err(DatabaseError::issue_not_found(issue_id));
        }

        tracing::info!(id = issue_id, status = ?update.status, "issue updated");
        self.get_issue(issue_id).await
    }

    /// Remove an issue and, by cascade, its comments.
    ///
    /// # Errors
    ///
    /// `DatabaseError::NotFound` if no issue has this id.
    pub async fn delete_issue(&self, issue_id: &str) -> Result<(), DatabaseError> {
        let _write = self.db().write_guard().await;
        let changed = self
            .db()
            .conn()
            .execute("DELETE FROM issues WHERE id = ?1", [issue_id])
            .await?;
        if changed == 0 {
            return Err(DatabaseError::issue_not_found(issue_id));
        }
        tracing::info!(id = issue_id, "issue deleted");
        Ok(())
    }
}
