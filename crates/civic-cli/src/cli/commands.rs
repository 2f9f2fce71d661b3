use std::path::PathBuf;

use civic_core::enums::Role;
use clap::{Args, Subcommand, ValueEnum};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP API.
    Serve(ServeArgs),
    /// Bearer token utilities.
    Token {
        #[command(subcommand)]
        action: TokenCommands,
    },
    /// Query snapshots and read the local issue store.
    Issue {
        #[command(subcommand)]
        action: IssueCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct ServeArgs {
    /// Override `server.host`.
    #[arg(long)]
    pub host: Option<String>,
    /// Override `server.port`.
    #[arg(long)]
    pub port: Option<u16>,
}

/// Role accepted by `token issue --role`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum RoleArg {
    Regular,
    Admin,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Regular => Self::Regular,
            RoleArg::Admin => Self::Admin,
        }
    }
}

#[derive(Clone, Debug, Subcommand)]
pub enum TokenCommands {
    /// Print a signed bearer token for a user.
    Issue {
        #[arg(long)]
        user: String,
        #[arg(long, value_enum, default_value_t = RoleArg::Regular)]
        role: RoleArg,
        #[arg(long)]
        name: Option<String>,
        /// Override `auth.token_ttl_secs`.
        #[arg(long)]
        ttl_secs: Option<u64>,
    },
}

#[derive(Clone, Debug, Subcommand)]
pub enum IssueCommands {
    /// Filter and sort a JSON snapshot of issues.
    Query {
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        search: Option<String>,
        /// all, open, in-progress, resolved, closed
        #[arg(long)]
        status: Option<String>,
        /// newest-first, oldest-first, priority-high-first, priority-low-first
        #[arg(long)]
        sort: Option<String>,
    },
    /// List issues in the local store, newest first.
    List {
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        owner: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get an issue by ID, with comments.
    Get { id: String },
}
