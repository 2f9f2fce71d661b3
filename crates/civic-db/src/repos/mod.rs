//! Repository methods, one module per table family.

pub mod comment;
pub mod issue;

pub use issue::IssueFilter;
