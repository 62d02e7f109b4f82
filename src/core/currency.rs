//! Currency conversion abstractions

use crate::core::table::{DecodeError, RateTable};
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Failure to obtain a rate table from the rates service.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request to {url} failed: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error: {status} from {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to decode rates from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: DecodeError,
    },
}

#[async_trait]
pub trait RatesSource: Send + Sync {
    async fn fetch_rates(&self) -> Result<RateTable, UpstreamError>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionResult {
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub rate: f64,
    pub converted: f64,
}

impl ConversionResult {
    pub fn new(from: &str, to: &str, amount: f64, rate: f64) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            amount,
            rate,
            converted: amount * rate,
        }
    }
}
