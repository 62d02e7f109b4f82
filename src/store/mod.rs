pub mod disk;
pub mod tiered;

pub use tiered::RateStore;

use crate::core::config::RatesConfig;
use crate::core::table::DecodeError;
use std::path::PathBuf;
use thiserror::Error;

/// The two files backing the rate table, in load priority order.
#[derive(Debug, Clone, PartialEq)]
pub struct StorePaths {
    pub new_rates_file: PathBuf,
    pub saved_rates_file: PathBuf,
}

impl StorePaths {
    pub fn new(new_rates_file: impl Into<PathBuf>, saved_rates_file: impl Into<PathBuf>) -> Self {
        Self {
            new_rates_file: new_rates_file.into(),
            saved_rates_file: saved_rates_file.into(),
        }
    }
}

impl From<&RatesConfig> for StorePaths {
    fn from(config: &RatesConfig) -> Self {
        Self::new(&config.new_rates_file, &config.saved_rates_file)
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid rates in {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },

    #[error("could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not encode rates: {0}")]
    Encode(#[from] serde_json::Error),
}
