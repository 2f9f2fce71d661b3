//! Closed enums for issue status, priority, query controls, roles and actions.
//!
//! All enums use kebab-case on the wire (`in-progress`, `priority-high-first`).
//! Every enum exposes `as_str()`, `ALL` and a `FromStr` that rejects unknown
//! values with [`CoreError::Validation`]; nothing is ever coerced to a default.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

/// Look `raw` up in a closed set by its wire spelling.
fn parse_closed<T: Copy>(
    raw: &str,
    field: &str,
    all: &[T],
    as_str: impl Fn(T) -> &'static str,
) -> Result<T, CoreError> {
    all.iter()
        .copied()
        .find(|candidate| as_str(*candidate) == raw)
        .ok_or_else(|| {
            let expected = all.iter().map(|v| as_str(*v)).collect::<Vec<_>>().join(", ");
            CoreError::Validation(format!("invalid {field} '{raw}' (expected one of: {expected})"))
        })
}

// ---------------------------------------------------------------------------
// IssueStatus
// ---------------------------------------------------------------------------

/// Status of a reported issue.
///
/// Any status may be set by an authorized update; there is no transition graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum IssueStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl IssueStatus {
    pub const ALL: [Self; 4] = [Self::Open, Self::InProgress, Self::Resolved, Self::Closed];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in-progress",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
        }
    }
}

impl FromStr for IssueStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_closed(s, "status", &Self::ALL, Self::as_str)
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Issue priority. Totally ordered by [`Priority::rank`]:
///
/// ```text
/// critical (4) > high (3) > medium (2) > low (1)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    /// Sort rank. Higher means more urgent.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Critical => 4,
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl FromStr for Priority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_closed(s, "priority", &Self::ALL, Self::as_str)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// StatusFilter
// ---------------------------------------------------------------------------

/// Status filter of the issue list view: `all` or exactly one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum StatusFilter {
    #[default]
    All,
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl StatusFilter {
    pub const ALL: [Self; 5] = [
        Self::All,
        Self::Open,
        Self::InProgress,
        Self::Resolved,
        Self::Closed,
    ];

    /// Whether an issue with `status` passes this filter.
    #[must_use]
    pub const fn matches(self, status: IssueStatus) -> bool {
        match self {
            Self::All => true,
            Self::Open => matches!(status, IssueStatus::Open),
            Self::InProgress => matches!(status, IssueStatus::InProgress),
            Self::Resolved => matches!(status, IssueStatus::Resolved),
            Self::Closed => matches!(status, IssueStatus::Closed),
        }
    }

    /// The single status this filter selects, or `None` for `all`.
    #[must_use]
    pub const fn status(self) -> Option<IssueStatus> {
        match self {
            Self::All => None,
            Self::Open => Some(IssueStatus::Open),
            Self::InProgress => Some(IssueStatus::InProgress),
            Self::Resolved => Some(IssueStatus::Resolved),
            Self::Closed => Some(IssueStatus::Closed),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Open => "open",
            Self::InProgress => "in-progress",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
        }
    }
}

impl From<IssueStatus> for StatusFilter {
    fn from(status: IssueStatus) -> Self {
        match status {
            IssueStatus::Open => Self::Open,
            IssueStatus::InProgress => Self::InProgress,
            IssueStatus::Resolved => Self::Resolved,
            IssueStatus::Closed => Self::Closed,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_closed(s, "status filter", &Self::ALL, Self::as_str)
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SortMode
// ---------------------------------------------------------------------------

/// Ordering of the issue list view.
///
/// The mobile client spelled these `date-desc`, `date-asc`, `priority-high`
/// and `priority-low`; those spellings are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    #[default]
    #[serde(alias = "date-desc")]
    NewestFirst,
    #[serde(alias = "date-asc")]
    OldestFirst,
    #[serde(alias = "priority-high")]
    PriorityHighFirst,
    #[serde(alias = "priority-low")]
    PriorityLowFirst,
}

impl SortMode {
    pub const ALL: [Self; 4] = [
        Self::NewestFirst,
        Self::OldestFirst,
        Self::PriorityHighFirst,
        Self::PriorityLowFirst,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NewestFirst => "newest-first",
            Self::OldestFirst => "oldest-first",
            Self::PriorityHighFirst => "priority-high-first",
            Self::PriorityLowFirst => "priority-low-first",
        }
    }

    const fn legacy_str(self) -> &'static str {
        match self {
            Self::NewestFirst => "date-desc",
            Self::OldestFirst => "date-asc",
            Self::PriorityHighFirst => "priority-high",
            Self::PriorityLowFirst => "priority-low",
        }
    }
}

impl FromStr for SortMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(mode) = Self::ALL.iter().copied().find(|m| m.legacy_str() == s) {
            return Ok(mode);
        }
        parse_closed(s, "sort mode", &Self::ALL, Self::as_str)
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Role carried by an authenticated identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    #[default]
    Regular,
    Admin,
}

impl Role {
    pub const ALL: [Self; 2] = [Self::Regular, Self::Admin];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_closed(s, "role", &Self::ALL, Self::as_str)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// An operation on an existing issue, as seen by the access control policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    Read,
    Update,
    Delete,
    Comment,
}

impl Action {
    pub const ALL: [Self; 4] = [Self::Read, Self::Update, Self::Delete, Self::Comment];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Comment => "comment",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn priority_rank_is_total_and_ordered() {
        let ranks: Vec<u8> = Priority::ALL.iter().map(|p| p.rank()).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
        assert!(Priority::Critical.rank() > Priority::High.rank());
        assert!(Priority::High.rank() > Priority::Medium.rank());
        assert!(Priority::Medium.rank() > Priority::Low.rank());
    }

    #[test]
    fn status_serde_uses_kebab_case() {
        let json = serde_json::to_string(&IssueStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
        let back: IssueStatus = serde_json::from_str("\"in-progress\"").unwrap();
        assert_eq!(back, IssueStatus::InProgress);
    }

    #[test]
    fn as_str_matches_serde_for_every_variant() {
        for status in IssueStatus::ALL {
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json, serde_json::Value::String(status.as_str().into()));
        }
        for priority in Priority::ALL {
            let json = serde_json::to_value(priority).unwrap();
            assert_eq!(json, serde_json::Value::String(priority.as_str().into()));
        }
        for mode in SortMode::ALL {
            let json = serde_json::to_value(mode).unwrap();
            assert_eq!(json, serde_json::Value::String(mode.as_str().into()));
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(serde_json::from_str::<IssueStatus>("\"pending\"").is_err());
        let err = "pending".parse::<IssueStatus>().unwrap_err();
        assert!(err.to_string().contains("invalid status 'pending'"));
    }

    #[test]
    fn unknown_priority_is_rejected() {
        assert!(serde_json::from_str::<Priority>("\"urgent\"").is_err());
        assert!("urgent".parse::<Priority>().is_err());
        assert!("High".parse::<Priority>().is_err());
    }

    #[rstest]
    #[case("newest-first", SortMode::NewestFirst)]
    #[case("date-desc", SortMode::NewestFirst)]
    #[case("oldest-first", SortMode::OldestFirst)]
    #[case("date-asc", SortMode::OldestFirst)]
    #[case("priority-high-first", SortMode::PriorityHighFirst)]
    #[case("priority-high", SortMode::PriorityHighFirst)]
    #[case("priority-low-first", SortMode::PriorityLowFirst)]
    #[case("priority-low", SortMode::PriorityLowFirst)]
    fn sort_mode_accepts_current_and_legacy_spellings(#[case] raw: &str, #[case] expected: SortMode) {
        assert_eq!(raw.parse::<SortMode>().unwrap(), expected);
        let json = format!("\"{raw}\"");
        assert_eq!(serde_json::from_str::<SortMode>(&json).unwrap(), expected);
    }

    #[test]
    fn sort_mode_rejects_unknown() {
        let err = "alphabetical".parse::<SortMode>().unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn status_filter_all_matches_everything() {
        for status in IssueStatus::ALL {
            assert!(StatusFilter::All.matches(status));
        }
    }

    #[test]
    fn status_filter_matches_only_its_status() {
        for status in IssueStatus::ALL {
            let filter = StatusFilter::from(status);
            for other in IssueStatus::ALL {
                assert_eq!(filter.matches(other), other == status);
            }
            assert_eq!(filter.status(), Some(status));
        }
        assert_eq!(StatusFilter::All.status(), None);
    }

    #[test]
    fn defaults_match_initial_view_state() {
        assert_eq!(StatusFilter::default(), StatusFilter::All);
        assert_eq!(SortMode::default(), SortMode::NewestFirst);
        assert_eq!(Priority::default(), Priority::Medium);
        assert_eq!(Role::default(), Role::Regular);
    }

    #[test]
    fn role_parse_roundtrip() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("superuser".parse::<Role>().is_err());
    }
}
