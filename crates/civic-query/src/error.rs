//! Query error types.

use thiserror::Error;

/// Errors from building a query or loading a snapshot.
///
/// A query that filters everything out is not an error; it yields an empty view.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Invalid status filter '{0}'")]
    InvalidStatusFilter(String),

    #[error("Invalid sort mode '{0}'")]
    InvalidSortMode(String),

    /// A snapshot record failed validation (unknown status/priority, bad date,
    /// duplicate id). The whole snapshot is rejected.
    #[error("Invalid issue record at index {index} (id {id}): {reason}")]
    InvalidRecord {
        index: usize,
        id: String,
        reason: String,
    },

    #[error("Malformed snapshot: {0}")]
    MalformedSnapshot(String),
}
