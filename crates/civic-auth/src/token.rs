//! HS256 token minting and verification.
//!
//! Both sides are built from the same shared secret (`auth.jwt_secret`).
//! The server only verifies; the CLI mints tokens for local testing.

use std::fmt;

use chrono::{TimeDelta, Utc};
use civic_core::identity::AuthIdentity;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::claims::CivicClaims;
use crate::error::AuthError;

/// Verifies bearer tokens and extracts [`CivicClaims`].
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    #[must_use]
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation.leeway = 0;
        Self {
            key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Verify signature and expiry.
    ///
    /// # Errors
    ///
    /// `AuthError::TokenExpired` for an expired token, `AuthError::InvalidToken`
    /// for anything else (bad signature, wrong algorithm, unknown role, empty
    /// subject).
    pub fn verify(&self, token: &str) -> Result<CivicClaims, AuthError> {
        let data = jsonwebtoken::decode::<CivicClaims>(token, &self.key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            })?;
        if data.claims.sub.trim().is_empty() {
            return Err(AuthError::InvalidToken("empty subject".into()));
        }
        tracing::trace!(sub = %data.claims.sub, role = %data.claims.role, "token verified");
        Ok(data.claims)
    }
}

impl fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenVerifier").finish_non_exhaustive()
    }
}

/// Mints bearer tokens for an identity.
#[derive(Clone)]
pub struct TokenSigner {
    key: EncodingKey,
    ttl: TimeDelta,
}

impl TokenSigner {
    #[must_use]
    pub fn new(secret: &[u8], ttl: TimeDelta) -> Self {
        Self {
            key: EncodingKey::from_secret(secret),
            ttl,
        }
    }

    /// Sign a token for `identity`, valid for the configured TTL from now.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Signing` if encoding fails.
    pub fn sign(&self, identity: &AuthIdentity) -> Result<String, AuthError> {
        let now = Utc::now();
        self.sign_claims(&CivicClaims {
            sub: identity.user_id.clone(),
            role: identity.role,
            name: identity.name.clone(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        })
    }

    /// Sign explicit claims.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Signing` if encoding fails.
    pub fn sign_claims(&self, claims: &CivicClaims) -> Result<String, AuthError> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }
}

impl fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSigner")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
