use civic_core::enums::Action;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated: missing bearer token")]
    NotAuthenticated,

    #[error("malformed authorization header")]
    MalformedHeader,

    #[error("token expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// Valid identity, insufficient rights.
    #[error("Not authorized to {action} this issue")]
    Forbidden { action: Action },

    #[error("token signing failed: {0}")]
    Signing(String),
}

impl AuthError {
    /// Whether this is an identity failure (missing or invalid credentials)
    /// as opposed to a policy denial or an internal fault.
    #[must_use]
    pub const fn is_unauthenticated(&self) -> bool {
        matches!(
            self,
            Self::NotAuthenticated | Self::MalformedHeader | Self::TokenExpired | Self::InvalidToken(_)
        )
    }
}
