use std::net::SocketAddr;

use anyhow::Context;
use carbon_logging::{carbon_info, carbon_warn, LogDestination};
use carbon_server::{serve, AppState, Cli, Settings};
use clap::Parser;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    carbon_logging::initialize(
        LogDestination::from_optional_file(cli.log_file.clone()),
        carbon_logging::parse_level(&cli.log_level),
    );

    let settings = Settings::load(cli.settings.as_deref()).context("loading settings")?;
    let state = AppState::from_config(&cli, &settings).context("building service state")?;

    let addr = SocketAddr::new(cli.host, cli.port);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    carbon_info!("CO2 microservice listening on {}", listener.local_addr()?);

    let shutdown = CancellationToken::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            carbon_warn!("Failed to listen for shutdown signal: {}", err);
            return;
        }
        carbon_info!("Shutting down");
        trigger.cancel();
    });

    serve(listener, state, shutdown).await?;
    Ok(())
}
