//! Core business logic abstractions

pub mod config;
pub mod currency;
pub mod log;
pub mod table;
pub mod validate;

// Re-export main types for cleaner imports
pub use currency::{ConversionResult, RatesSource, UpstreamError};
pub use table::{DecodeError, RateTable};
pub use validate::{ValidationError, validate};
