//! # civic-server
//!
//! HTTP API for civic issues: report, browse, comment, update and delete.
//!
//! Built on axum. Authentication is an extractor ([`extract::AuthUser`]);
//! authorization is [`civic_auth::authorize`] consulted by each mutating
//! handler after the issue is loaded.

pub mod error;
pub mod extract;
mod routes;
pub mod state;

use std::time::Duration;

use axum::Router;
use axum::http::Method;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use civic_auth::TokenVerifier;
use civic_config::{CivicConfig, ConfigError};
use civic_db::error::DatabaseError;
use civic_db::service::CivicService;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use state::AppState;

/// Failures that stop the server from starting or keep it from running.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Full application router with CORS and request tracing.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    routes::api_routes()
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::NotFound(String::from("Route not found"))
}

/// Open the store, verify the secret is configured, and serve until Ctrl+C
/// or SIGTERM.
///
/// # Errors
///
/// `ServerError::Config` when `auth.jwt_secret` is missing or too short,
/// `ServerError::Database` if the store cannot be opened, `ServerError::Bind`
/// if the address is taken.
pub async fn serve(config: &CivicConfig) -> Result<(), ServerError> {
    let secret = config.auth.require_secret()?;
    let store = CivicService::new_local(&config.database.path).await?;
    let state = AppState::new(store, TokenVerifier::new(secret));

    let address = config.server.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| ServerError::Bind {
            address: address.clone(),
            source,
        })?;
    tracing::info!(%address, db = %config.database.path, "server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        tracing::info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
                tracing::info!("received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
