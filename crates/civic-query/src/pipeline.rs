//! Filter-then-sort pipeline over an issue snapshot.

use std::cmp::Ordering;

use civic_core::entities::Issue;
use civic_core::enums::{SortMode, StatusFilter};
use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// One evaluation of the list view: search term, status filter, sort mode.
///
/// Rebuilt for every evaluation; nothing about it is persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueQuery {
    #[serde(default)]
    pub search_term: String,
    #[serde(default)]
    pub status_filter: StatusFilter,
    #[serde(default)]
    pub sort_mode: SortMode,
}

impl IssueQuery {
    #[must_use]
    pub fn new(search_term: impl Into<String>, status_filter: StatusFilter, sort_mode: SortMode) -> Self {
        Self {
            search_term: search_term.into(),
            status_filter,
            sort_mode,
        }
    }

    /// Build a query from raw control values. `None` selects the default
    /// (`all`, `newest-first`).
    ///
    /// # Errors
    ///
    /// Returns `QueryError::InvalidStatusFilter` or `QueryError::InvalidSortMode`
    /// for values outside the closed sets.
    pub fn parse(
        search_term: Option<&str>,
        status_filter: Option<&str>,
        sort_mode: Option<&str>,
    ) -> Result<Self, QueryError> {
        let status_filter = status_filter
            .map(|raw| raw.parse().map_err(|_| QueryError::InvalidStatusFilter(raw.to_string())))
            .transpose()?
            .unwrap_or_default();
        let sort_mode = sort_mode
            .map(|raw| raw.parse().map_err(|_| QueryError::InvalidSortMode(raw.to_string())))
            .transpose()?
            .unwrap_or_default();
        Ok(Self {
            search_term: search_term.unwrap_or_default().to_string(),
            status_filter,
            sort_mode,
        })
    }

    /// Whether `issue` passes both the text and the status predicate.
    #[must_use]
    pub fn accepts(&self, issue: &Issue) -> bool {
        TextMatcher::new(&self.search_term).matches(issue) && self.status_filter.matches(issue.status)
    }
}

/// Case-insensitive substring match over title and description.
struct TextMatcher {
    needle: String,
}

impl TextMatcher {
    fn new(term: &str) -> Self {
        Self {
            needle: term.to_lowercase(),
        }
    }

    fn matches(&self, issue: &Issue) -> bool {
        self.needle.is_empty()
            || issue.title.to_lowercase().contains(&self.needle)
            || issue.description.to_lowercase().contains(&self.needle)
    }
}

/// Ordering for `mode`. Equal keys compare `Equal`; callers must sort stably.
fn compare(a: &Issue, b: &Issue, mode: SortMode) -> Ordering {
    match mode {
        SortMode::NewestFirst => b.created_at.cmp(&a.created_at),
        SortMode::OldestFirst => a.created_at.cmp(&b.created_at),
        SortMode::PriorityHighFirst => b.priority.rank().cmp(&a.priority.rank()),
        SortMode::PriorityLowFirst => a.priority.rank().cmp(&b.priority.rank()),
    }
}

/// Evaluate `q` over a borrowed snapshot.
///
/// Issues that pass both predicates are returned in `q.sort_mode` order.
/// Ties keep their snapshot order.
#[must_use]
pub fn query<'a>(issues: &'a [Issue], q: &IssueQuery) -> Vec<&'a Issue> {
    let matcher = TextMatcher::new(&q.search_term);
    let mut view: Vec<&Issue> = issues
        .iter()
        .filter(|issue| matcher.matches(issue) && q.status_filter.matches(issue.status))
        .collect();
    // `sort_by` is stable.
    view.sort_by(|a, b| compare(a, b, q.sort_mode));
    tracing::trace!(
        total = issues.len(),
        matched = view.len(),
        sort = %q.sort_mode,
        "issue query evaluated"
    );
    view
}

/// Evaluate `q` over an owned list, for callers that already hold a fresh copy
/// (e.g. rows just read from storage). Same semantics as [`query`].
#[must_use]
pub fn query_owned(mut issues: Vec<Issue>, q: &IssueQuery) -> Vec<Issue> {
    let matcher = TextMatcher::new(&q.search_term);
    issues.retain(|issue| matcher.matches(issue) && q.status_filter.matches(issue.status));
    issues.sort_by(|a, b| compare(a, b, q.sort_mode));
    issues
}
