pub mod gateway;
pub mod rates;
pub mod setup;
