//! Request extractors.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use civic_auth::AuthError;
use civic_core::identity::AuthIdentity;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated caller. Rejects with 401 before the handler runs.
#[derive(Debug, Clone)]
pub struct AuthUser(pub AuthIdentity);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = match parts.headers.get(AUTHORIZATION) {
            Some(value) => Some(value.to_str().map_err(|_| AuthError::MalformedHeader)?),
            None => None,
        };
        let identity = civic_auth::authenticate(&state.verifier, header).map_err(|e| {
            tracing::debug!(error = %e, path = %parts.uri.path(), "authentication failed");
            ApiError::from(e)
        })?;
        Ok(Self(identity))
    }
}
