pub mod cli;
pub mod core;
pub mod http;
pub mod providers;
pub mod store;

use anyhow::Result;
use tracing::{debug, info};

/// Commands that need the loaded configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    Rates,
    Gateway,
    Seed,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!(?command, "fxmicro starting...");

    let config = crate::core::config::AppConfig::load(config_path)?;
    debug!(
        rates = ?config.rates,
        gateway_bind = %config.gateway.bind,
        rates_url = %config.gateway.rates_url,
        disable_auth = config.gateway.disable_auth,
        "Loaded config"
    );

    match command {
        AppCommand::Rates => cli::rates::serve(&config.rates).await,
        AppCommand::Gateway => cli::gateway::serve(&config.gateway).await,
        AppCommand::Seed => cli::rates::seed(&config.rates).await,
    }
}
