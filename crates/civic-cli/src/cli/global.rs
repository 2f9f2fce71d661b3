use std::path::PathBuf;

use clap::ValueEnum;

/// Output encoding for command results.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    Json,
    /// Aligned text table, one row per issue.
    Table,
    /// Compact single-line JSON, for piping.
    Raw,
}

/// When status and priority cells in tables are colored.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum ColorMode {
    /// Only on a terminal, and only if `NO_COLOR` is unset.
    #[default]
    Auto,
    Always,
    Never,
}

/// Flags shared by every `civic` command, accepted before or after it.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub color: ColorMode,
    pub limit: Option<u32>,
    pub quiet: bool,
    pub verbose: bool,
    /// Extra config layer from `--config`.
    pub config: Option<PathBuf>,
}
