//! Bearer token configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Shortest accepted HS256 secret, in bytes.
pub const MIN_SECRET_LEN: usize = 16;

/// Seven days.
const fn default_token_ttl_secs() -> u64 {
    7 * 24 * 60 * 60
}

#[derive(Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Shared HS256 secret for signing and verifying bearer tokens.
    #[serde(default)]
    pub jwt_secret: String,

    /// Lifetime of tokens minted by `civic token issue`.
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_secs: default_token_ttl_secs(),
        }
    }
}

impl AuthConfig {
    /// Check if a secret is set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.jwt_secret.is_empty()
    }

    /// The secret, if set and long enough.
    ///
    /// # Errors
    ///
    /// `ConfigError::NotConfigured` when unset, `ConfigError::InvalidValue`
    /// when shorter than [`MIN_SECRET_LEN`].
    pub fn require_secret(&self) -> Result<&[u8], ConfigError> {
        if !self.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "auth".into(),
            });
        }
        if self.jwt_secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::InvalidValue {
                field: "auth.jwt_secret".into(),
                reason: format!("must be at least {MIN_SECRET_LEN} bytes"),
            });
        }
        Ok(self.jwt_secret.as_bytes())
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &if self.is_configured() { "<redacted>" } else { "<unset>" })
            .field("token_ttl_secs", &self.token_ttl_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = AuthConfig::default();
        assert!(!config.is_configured());
        assert!(matches!(
            config.require_secret(),
            Err(ConfigError::NotConfigured { .. })
        ));
    }

    #[test]
    fn short_secret_is_rejected() {
        let config = AuthConfig {
            jwt_secret: "short".into(),
            ..Default::default()
        };
        assert!(matches!(
            config.require_secret(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn debug_redacts_secret() {
        let config = AuthConfig {
            jwt_secret: "super-secret-value-123".into(),
            ..Default::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
