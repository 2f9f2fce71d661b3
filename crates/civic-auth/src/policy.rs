//! Issue access control policy.
//!
//! | action  | rule                                   |
//! |---------|----------------------------------------|
//! | read    | always allowed                         |
//! | comment | any authenticated requester            |
//! | update  | owner or admin                         |
//! | delete  | owner or admin                         |
//!
//! The caller has already authenticated the requester and loaded the issue.
//! A missing issue is a not-found error before this policy is consulted.

use civic_core::entities::Issue;
use civic_core::enums::{Action, Role};
use civic_core::identity::AuthIdentity;

use crate::error::AuthError;

const NOT_AUTHORIZED: &str = "not authorized";

/// Inputs to one authorization decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorizationRequest<'a> {
    pub requester_id: &'a str,
    pub requester_role: Role,
    /// `None` when the record predates ownership tracking.
    pub resource_owner_id: Option<&'a str>,
}

impl<'a> AuthorizationRequest<'a> {
    #[must_use]
    pub fn new(identity: &'a AuthIdentity, resource_owner_id: Option<&'a str>) -> Self {
        Self {
            requester_id: &identity.user_id,
            requester_role: identity.role,
            resource_owner_id,
        }
    }

    /// Request against a loaded issue snapshot.
    #[must_use]
    pub fn for_issue(identity: &'a AuthIdentity, issue: &'a Issue) -> Self {
        Self::new(identity, issue.owner_id.as_deref())
    }

    /// Owner match. An empty requester id never matches.
    fn is_owner(&self) -> bool {
        !self.requester_id.is_empty() && self.resource_owner_id == Some(self.requester_id)
    }
}

/// Outcome of [`authorize`]. `Deny` is an expected result, not a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny { reason: &'static str },
}

impl Decision {
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Decide whether the requester may perform `action` on the resource.
#[must_use]
pub fn authorize(action: Action, req: &AuthorizationRequest<'_>) -> Decision {
    match action {
        Action::Read | Action::Comment => Decision::Allow,
        Action::Update | Action::Delete => {
            if req.is_owner() || req.requester_role == Role::Admin {
                Decision::Allow
            } else {
                Decision::Deny {
                    reason: NOT_AUTHORIZED,
                }
            }
        }
    }
}

/// [`authorize`] for route handlers: `Deny` becomes `AuthError::Forbidden`.
///
/// # Errors
///
/// Returns `AuthError::Forbidden` when the policy denies the action.
pub fn authorize_or_forbid(action: Action, req: &AuthorizationRequest<'_>) -> Result<(), AuthError> {
    match authorize(action, req) {
        Decision::Allow => Ok(()),
        Decision::Deny { reason } => {
            tracing::info!(
                %action,
                requester = req.requester_id,
                owner = req.resource_owner_id.unwrap_or("<none>"),
                reason,
                "access denied"
            );
            Err(AuthError::Forbidden { action })
        }
    }
}
