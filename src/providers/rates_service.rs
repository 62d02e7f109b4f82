use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::core::currency::{RatesSource, UpstreamError};
use crate::core::table::RateTable;

/// Fetches the whole rate table from the rates service's `GET /rates`.
pub struct HttpRatesSource {
    url: String,
    client: reqwest::Client,
}

impl HttpRatesSource {
    pub fn new(url: &str) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("fxmicro/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(HttpRatesSource {
            url: url.to_string(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RatesSource for HttpRatesSource {
    #[instrument(name = "RatesFetch", skip(self), fields(url = %self.url))]
    async fn fetch_rates(&self) -> Result<RateTable, UpstreamError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|source| UpstreamError::Unreachable {
                url: self.url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                url: self.url.clone(),
                status,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| UpstreamError::Unreachable {
                url: self.url.clone(),
                source,
            })?;

        let table = RateTable::from_json(&body).map_err(|source| UpstreamError::Decode {
            url: self.url.clone(),
            source,
        })?;
        debug!(bases = table.len(), "Received rates");
        Ok(table)
    }
}
