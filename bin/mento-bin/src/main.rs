mod cli;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use dotenvy::dotenv;
use pragma_common::{
    services::{Service, ServiceGroup},
    telemetry::init_telemetry,
};

use mento_api::{ApiService, AppState};
use mento_metrics::MetricsRegistry;
use mento_zapper::ZapperClient;

use crate::cli::ReserveCli;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let cli = ReserveCli::parse();

    let app_name = "mento_reserve_api";
    if let Err(e) = init_telemetry(app_name, cli.otel_collector_endpoint.clone()) {
        panic!("Could not init telemetry: {e}");
    }

    let targets = cli.targets().context("Invalid RESERVE_ADDRESSES")?;
    tracing::info!(
        addresses = ?targets.unique_addresses(),
        chain_ids = ?targets.chain_ids(),
        "Tracking reserve addresses",
    );

    let client = ZapperClient::new(&cli.zapper_api_key, cli.zapper_api_url.as_str())
        .context("Could not init the portfolio API client")?;

    let app_state = AppState {
        provider: Arc::new(client),
        targets: Arc::new(targets),
        metrics: MetricsRegistry::new(),
    };

    let api_service = ApiService::new(
        app_state,
        "0.0.0.0",
        cli.api_port,
        Duration::from_secs(cli.request_timeout_secs),
    );

    ServiceGroup::default()
        .with_critical(api_service)
        .start_and_drive_to_end()
        .await?;

    Ok(())
}
