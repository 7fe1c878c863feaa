//! TCP server for the number guessing game.

use anyhow::Context;
use guess_server::{Config, Server};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env().context("reading configuration")?;

    info!(
        "Starting guess-server on {} (players) and {} (observers)",
        config.player_addr_string(),
        config.observer_addr_string()
    );

    let server = Server::bind(&config).await.context("binding listeners")?;

    server
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "cannot listen for Ctrl+C, running until killed");
                std::future::pending::<()>().await;
            }
            info!("Received Ctrl+C");
        })
        .await;

    Ok(())
}
