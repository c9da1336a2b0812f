//! Pastewatch application shell.
//!
//! This is the thin binary that wires tracing, configuration, and the
//! shutdown signal together. Core business logic lives in the `crates/`
//! libraries.

use anyhow::Context;
use pastewatch_core::AppConfig;
use pastewatch_scanner::ScrapeOrchestrator;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Initialize tracing subscriber for logging
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,pastewatch=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting pastewatch v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load_with_env().context("loading configuration")?;
    let mut orchestrator =
        ScrapeOrchestrator::new(config).context("building the scrape pipeline")?;

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("received CTRL+C, shutting down...");
                signal_cancel.cancel();
            }
            Err(err) => {
                error!("failed to listen for CTRL+C: {err}");
            }
        }
    });

    orchestrator.run(cancel).await?;

    info!("exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::EnvFilter;

    #[test]
    fn test_default_filter_directive_parses() {
        assert!(EnvFilter::try_new("info,pastewatch=debug").is_ok());
    }
}
