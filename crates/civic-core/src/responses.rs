//! Response bodies shared by the server and the CLI.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Issue;

/// Plain `{"message": ...}` body, used for errors and for delete acknowledgements.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response from `civic issue query`: the query echoed back with its result.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct IssueQueryResponse {
    pub search: String,
    pub status: String,
    pub sort: String,
    pub total_results: u32,
    pub results: Vec<Issue>,
}
