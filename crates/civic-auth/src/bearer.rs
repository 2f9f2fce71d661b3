//! `Authorization: Bearer <token>` parsing.

use crate::error::AuthError;

/// Extract the token from an `Authorization` header value.
///
/// The scheme is matched case-insensitively.
///
/// # Errors
///
/// `AuthError::NotAuthenticated` if the header is absent, or
/// `AuthError::MalformedHeader` if it is not a non-empty bearer token.
pub fn parse_bearer(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::NotAuthenticated)?.trim();
    let (scheme, token) = header.split_once(' ').ok_or(AuthError::MalformedHeader)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::MalformedHeader);
    }
    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::MalformedHeader);
    }
    Ok(token)
}
