//! # civic-query
//!
//! The "My Issues" list pipeline: free-text search, status filter, and a
//! stable multi-mode sort over an immutable snapshot of issues.
//!
//! Evaluation is pure. [`query`] borrows the snapshot and returns a new
//! ordered view; the snapshot is never reordered or modified, so callers can
//! re-run it on every keystroke. [`LatestQuery`] guards asynchronous callers
//! against a stale evaluation overwriting a newer one.

pub mod error;
pub mod latest;
pub mod pipeline;
pub mod snapshot;

pub use error::QueryError;
pub use latest::{LatestQuery, QueryTicket};
pub use pipeline::{IssueQuery, query, query_owned};
pub use snapshot::load_snapshot;
