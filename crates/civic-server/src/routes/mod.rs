//! Route table.

mod auth;
mod health;
mod issues;

use axum::Router;
use axum::routing::{get, post};

use crate::state::AppState;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/auth/me", get(auth::me))
        .route("/api/issues", get(issues::list).post(issues::create))
        .route("/api/issues/user/my-issues", get(issues::my_issues))
        .route(
            "/api/issues/:id",
            get(issues::get_one).patch(issues::update).delete(issues::remove),
        )
        .route("/api/issues/:id/comments", post(issues::comment))
}
