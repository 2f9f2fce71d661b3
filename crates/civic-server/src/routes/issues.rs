//! Issue handlers.
//!
//! Mutating routes run in a fixed order: authenticate (extractor), load the
//! issue, consult the policy, then touch storage. A missing issue is 404 for
//! everyone; a denial is 403 and leaves the record unchanged.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use civic_auth::{AuthorizationRequest, authorize, authorize_or_forbid};
use civic_core::entities::{Issue, NewIssue};
use civic_core::enums::{Action, Priority, Role, StatusFilter};
use civic_core::identity::AuthIdentity;
use civic_core::responses::MessageResponse;
use civic_db::repos::IssueFilter;
use civic_db::updates::issue::IssueUpdate;
use civic_query::{IssueQuery, query_owned};
use serde::Deserialize;

use crate::error::ApiError;
use crate::extract::AuthUser;
use crate::state::AppState;

/// Query string for `GET /api/issues`.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub status: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
}

/// Query string for `GET /api/issues/user/my-issues`.
#[derive(Debug, Default, Deserialize)]
pub struct MyIssuesParams {
    pub search: Option<String>,
    pub status: Option<String>,
    pub sort: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommentBody {
    #[serde(default)]
    pub text: String,
}

/// Empty query-string values mean "not set".
fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.trim().is_empty())
}

fn anonymous() -> AuthIdentity {
    AuthIdentity::new("", Role::Regular)
}

pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Issue>>, ApiError> {
    let Query(params) = params?;
    let status_filter: StatusFilter = non_empty(params.status.as_ref())
        .map(|raw| {
            raw.parse::<StatusFilter>()
                .map_err(|_| ApiError::Validation(format!("Invalid status filter '{raw}'")))
        })
        .transpose()?
        .unwrap_or_default();
    let priority: Option<Priority> = non_empty(params.priority.as_ref())
        .map(|raw| {
            raw.parse::<Priority>()
                .map_err(|_| ApiError::Validation(format!("Invalid priority '{raw}'")))
        })
        .transpose()?;
    let q = IssueQuery::parse(params.search.as_deref(), None, non_empty(params.sort.as_ref()))?;

    let filter = IssueFilter {
        status: status_filter.status(),
        category: non_empty(params.category.as_ref()).map(String::from),
        priority,
        ..IssueFilter::default()
    };
    let stored = state.store.list_issues(&filter).await?;

    let viewer = anonymous();
    let mut issues = query_owned(stored, &q);
    issues.retain(|issue| authorize(Action::Read, &AuthorizationRequest::for_issue(&viewer, issue)).is_allowed());
    Ok(Json(issues))
}

pub async fn my_issues(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    params: Result<Query<MyIssuesParams>, QueryRejection>,
) -> Result<Json<Vec<Issue>>, ApiError> {
    let Query(params) = params?;
    let q = IssueQuery::parse(
        params.search.as_deref(),
        non_empty(params.status.as_ref()),
        non_empty(params.sort.as_ref()),
    )?;
    let stored = state
        .store
        .list_issues(&IssueFilter::owned_by(identity.user_id.as_str()))
        .await?;
    Ok(Json(query_owned(stored, &q)))
}

pub async fn create(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    body: Result<Json<NewIssue>, JsonRejection>,
) -> Result<(StatusCode, Json<Issue>), ApiError> {
    let Json(new) = body?;
    let issue = state.store.create_issue(&identity.user_id, new).await?;
    Ok((StatusCode::CREATED, Json(issue)))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
    viewer: Option<AuthUser>,
) -> Result<Json<Issue>, ApiError> {
    let issue = state.store.get_issue(&id).await?;
    let viewer = viewer.map_or_else(anonymous, |AuthUser(identity)| identity);
    authorize_or_forbid(Action::Read, &AuthorizationRequest::for_issue(&viewer, &issue))?;
    Ok(Json(issue))
}

pub async fn update(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<String>,
    body: Result<Json<IssueUpdate>, JsonRejection>,
) -> Result<Json<Issue>, ApiError> {
    let current = state.store.get_issue(&id).await?;
    authorize_or_forbid(Action::Update, &AuthorizationRequest::for_issue(&identity, &current))?;
    let Json(update) = body?;
    let updated = state.store.update_issue(&id, update).await?;
    Ok(Json(updated))
}

pub async fn comment(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<String>,
    body: Result<Json<CommentBody>, JsonRejection>,
) -> Result<Json<Issue>, ApiError> {
    let current = state.store.get_issue(&id).await?;
    authorize_or_forbid(Action::Comment, &AuthorizationRequest::for_issue(&identity, &current))?;
    let Json(body) = body?;
    let issue = state.store.add_comment(&id, &identity.user_id, &body.text).await?;
    Ok(Json(issue))
}

pub async fn remove(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let current = state.store.get_issue(&id).await?;
    authorize_or_forbid(Action::Delete, &AuthorizationRequest::for_issue(&identity, &current))?;
    state.store.delete_issue(&id).await?;
    Ok(Json(MessageResponse::new("Issue deleted")))
}
