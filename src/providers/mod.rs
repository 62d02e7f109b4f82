pub mod rates_service;

pub use rates_service::HttpRatesSource;
