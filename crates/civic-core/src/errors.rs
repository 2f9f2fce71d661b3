//! Cross-cutting error types for Civic.
//!
//! Domain-specific errors (`DatabaseError`, `AuthError`, `QueryError`) live in
//! their own crates. The HTTP layer maps all of them onto status codes.

use thiserror::Error;

/// Errors that can be raised by any Civic crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Data failed validation (unknown enum value, blank required field, bad date).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
