use chrono::{DateTime, Utc};
use civic_core::enums::Role;
use civic_core::identity::AuthIdentity;
use serde::{Deserialize, Serialize};

/// Claims carried by a Civic bearer token.
///
/// `role` defaults to `regular` when absent; an unrecognized role makes the
/// whole token invalid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CivicClaims {
    /// User ID.
    pub sub: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

impl CivicClaims {
    /// Convert to a lightweight `AuthIdentity` for cross-crate passing.
    #[must_use]
    pub fn to_identity(&self) -> AuthIdentity {
        AuthIdentity {
            user_id: self.sub.clone(),
            role: self.role,
            name: self.name.clone(),
        }
    }

    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Check if the token is expired or expires within `buffer_secs`.
    #[must_use]
    pub fn is_near_expiry(&self, buffer_secs: i64) -> bool {
        let threshold = Utc::now() + chrono::TimeDelta::seconds(buffer_secs);
        self.expires_at().is_none_or(|at| at <= threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_claims(expires_at: DateTime<Utc>) -> CivicClaims {
        CivicClaims {
            sub: "u_test123".into(),
            role: Role::Admin,
            name: Some("Dana".into()),
            iat: Utc::now().timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    #[test]
    fn to_identity_maps_all_fields() {
        let claims = make_claims(Utc::now() + chrono::TimeDelta::hours(1));
        let identity = claims.to_identity();
        assert_eq!(identity.user_id, "u_test123");
        assert_eq!(identity.role, Role::Admin);
        assert_eq!(identity.name.as_deref(), Some("Dana"));
    }

    #[test]
    fn is_near_expiry_false_when_far_future() {
        let claims = make_claims(Utc::now() + chrono::TimeDelta::hours(1));
        assert!(!claims.is_near_expiry(60));
    }

    #[test]
    fn is_near_expiry_true_when_past() {
        let claims = make_claims(Utc::now() - chrono::TimeDelta::seconds(10));
        assert!(claims.is_near_expiry(60));
    }

    #[test]
    fn is_near_expiry_true_within_buffer() {
        let claims = make_claims(Utc::now() + chrono::TimeDelta::seconds(30));
        assert!(claims.is_near_expiry(60));
    }

    #[test]
    fn missing_role_defaults_to_regular() {
        let claims: CivicClaims =
            serde_json::from_str(r#"{"sub": "u1", "iat": 0, "exp": 10}"#).unwrap();
        assert_eq!(claims.role, Role::Regular);
        assert!(claims.name.is_none());
    }

    #[test]
    fn unknown_role_is_rejected() {
        let parsed =
            serde_json::from_str::<CivicClaims>(r#"{"sub": "u1", "role": "root", "iat": 0, "exp": 10}"#);
        assert!(parsed.is_err());
    }
}
