use civic_config::CivicConfig;

use crate::cli::ServeArgs;

/// Handle `civic serve`.
pub async fn handle(args: &ServeArgs, mut config: CivicConfig) -> anyhow::Result<()> {
    if let Some(host) = &args.host {
        config.server.host.clone_from(host);
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    civic_server::serve(&config).await?;
    Ok(())
}
