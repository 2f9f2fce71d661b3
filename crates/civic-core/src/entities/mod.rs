//! Entity structs for Civic domain objects.
//!
//! Each entity maps to a table in the libSQL database (see `civic-db`
//! migrations). All structs derive `Serialize`, `Deserialize`, and `JsonSchema`
//! for JSON roundtrip and schema validation.

mod comment;
mod issue;

pub use comment::Comment;
pub use issue::{Issue, NewIssue, validate_coordinates};
