use crate::core::config::GatewayConfig;
use crate::http::{self, auth::AuthGate};
use crate::providers::HttpRatesSource;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

/// Runs the gateway until shutdown.
pub async fn serve(config: &GatewayConfig) -> Result<()> {
    let gate = AuthGate::from(config);
    if gate.is_disabled() {
        warn!("Authentication is disabled, /convert is open to everyone");
    } else if config.api_key.is_empty() {
        warn!("No API key configured, only `Authorization: Bearer ` will be accepted");
    }

    let source = HttpRatesSource::new(&config.rates_url)
        .with_context(|| format!("Failed to create client for {}", config.rates_url))?;
    info!(rates_url = %source.url(), "Using rates service");

    http::serve(
        "Gateway",
        &config.bind,
        http::gateway::router(Arc::new(source), gate),
    )
    .await
}
