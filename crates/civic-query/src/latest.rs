//! Latest-wins publication of query results.
//!
//! When evaluations run asynchronously, a slow evaluation of an old query can
//! finish after a fast evaluation of a newer one. Each evaluation takes a
//! [`QueryTicket`] from [`LatestQuery::begin`]; [`LatestQuery::publish`] only
//! accepts a result whose ticket is still the newest issued.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// Handle identifying one evaluation. Tickets are strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct QueryTicket(u64);

/// Holds the most recently published result.
#[derive(Debug)]
pub struct LatestQuery<T> {
    issued: AtomicU64,
    published: Mutex<Option<(QueryTicket, T)>>,
}

impl<T> LatestQuery<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            issued: AtomicU64::new(0),
            published: Mutex::new(None),
        }
    }

    /// Start an evaluation. Invalidates every earlier ticket.
    pub fn begin(&self) -> QueryTicket {
        QueryTicket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether no newer evaluation has started since `ticket`.
    #[must_use]
    pub fn is_current(&self, ticket: QueryTicket) -> bool {
        self.issued.load(Ordering::SeqCst) == ticket.0
    }

    /// Publish `result` if `ticket` is still current. Returns `false` and
    /// drops the result when a newer evaluation has started.
    pub fn publish(&self, ticket: QueryTicket, result: T) -> bool {
        let mut slot = self.published.lock().unwrap_or_else(PoisonError::into_inner);
        if !self.is_current(ticket) {
            tracing::debug!(ticket = ticket.0, "dropping stale query result");
            return false;
        }
        if slot.as_ref().is_some_and(|(held, _)| *held >= ticket) {
            return false;
        }
        *slot = Some((ticket, result));
        true
    }
}

impl<T> Default for LatestQuery<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> LatestQuery<T> {
    /// The last accepted result, if any.
    #[must_use]
    pub fn latest(&self) -> Option<T> {
        self.published
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|(_, result)| result.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_ticket_invalidates_older() {
        let latest = LatestQuery::<u32>::new();
        let first = latest.begin();
        let second = latest.begin();
        assert!(!latest.is_current(first));
        assert!(latest.is_current(second));
        assert!(latest.publish(second, 2));
        assert!(!latest.publish(first, 1));
        assert_eq!(latest.latest(), Some(2));
    }

    #[test]
    fn same_ticket_publishes_once() {
        let latest = LatestQuery::<u32>::new();
        let t = latest.begin();
        assert!(latest.publish(t, 7));
        assert!(!latest.publish(t, 8));
        assert_eq!(latest.latest(), Some(7));
    }

    #[test]
    fn empty_until_published() {
        let latest = LatestQuery::<String>::new();
        assert!(latest.latest().is_none());
    }
}
