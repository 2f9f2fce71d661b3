pub mod issue;
pub mod serve;
pub mod token;

use civic_config::CivicConfig;

use crate::cli::{Commands, GlobalFlags};

/// Route a parsed command to its handler.
pub async fn dispatch(command: Commands, config: CivicConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Serve(args) => serve::handle(&args, config).await,
        Commands::Token { action } => token::handle(&action, &config, flags),
        Commands::Issue { action } => issue::handle(action, &config, flags).await,
    }
}
