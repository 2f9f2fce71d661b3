//! Partial-update payloads for repo `update_*` methods.

pub mod issue;
