use anyhow::Context;
use civic_config::CivicConfig;

use crate::cli::GlobalFlags;

/// Load layered config, honoring `--config` and a `.env` in the working tree.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<CivicConfig> {
    match &flags.config {
        Some(path) => CivicConfig::load_from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => CivicConfig::load_with_dotenv().context("failed to load configuration"),
    }
}
