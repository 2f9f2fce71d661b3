//! # civic-auth
//!
//! Authentication and authorization for the Civic issue API.
//!
//! - `Authorization: Bearer` header parsing
//! - HS256 token minting and verification (`jsonwebtoken`)
//! - The access control policy deciding who may update, delete or comment
//!   on an issue
//!
//! Authentication always runs first. A request that fails it never reaches
//! [`policy::authorize`].

pub mod bearer;
pub mod claims;
pub mod error;
pub mod policy;
pub mod token;

pub use claims::CivicClaims;
pub use error::AuthError;
pub use policy::{AuthorizationRequest, Decision, authorize, authorize_or_forbid};
pub use token::{TokenSigner, TokenVerifier};

use civic_core::identity::AuthIdentity;

/// Resolve the requester identity from a raw `Authorization` header value.
///
/// # Errors
///
/// Returns `AuthError::NotAuthenticated` when the header is absent,
/// `AuthError::MalformedHeader` for a non-bearer value, and
/// `AuthError::TokenExpired` / `AuthError::InvalidToken` when verification fails.
pub fn authenticate(
    verifier: &TokenVerifier,
    authorization: Option<&str>,
) -> Result<AuthIdentity, AuthError> {
    let token = bearer::parse_bearer(authorization)?;
    let claims = verifier.verify(token)?;
    Ok(claims.to_identity())
}
