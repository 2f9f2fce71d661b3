use axum::Json;
use civic_core::identity::AuthIdentity;

use crate::extract::AuthUser;

/// The identity carried by the caller's token.
pub async fn me(AuthUser(identity): AuthUser) -> Json<AuthIdentity> {
    Json(identity)
}
