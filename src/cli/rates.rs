use crate::core::config::RatesConfig;
use crate::core::table::seed_rates;
use crate::http;
use crate::store::{RateStore, StorePaths};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

/// Runs the rates service until shutdown.
pub async fn serve(config: &RatesConfig) -> Result<()> {
    let store = Arc::new(RateStore::new(StorePaths::from(config)));
    info!(
        new_rates_file = %config.new_rates_file.display(),
        saved_rates_file = %config.saved_rates_file.display(),
        "Rates storage"
    );

    http::serve("Rates service", &config.bind, http::rates::router(store)).await
}

/// Writes the bundled seed table as the saved snapshot if there is none yet.
pub async fn seed(config: &RatesConfig) -> Result<()> {
    let store = RateStore::new(StorePaths::from(config));
    let written = store
        .seed(&seed_rates())
        .await
        .context("Failed to seed rates")?;

    if written {
        info!("Seeded {}", config.saved_rates_file.display());
    } else {
        info!(
            "{} already exists, leaving it alone",
            config.saved_rates_file.display()
        );
    }
    Ok(())
}
