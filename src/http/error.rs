use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::core::currency::UpstreamError;
use crate::core::validate::ValidationError;

/// Errors surfaced to HTTP clients of either service.
///
/// Messages are written as plain text. Downstream and storage causes are
/// logged where they happen and never included here.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid JSON body")]
    InvalidJson,

    #[error("invalid rate data: {0}")]
    InvalidRates(#[from] ValidationError),

    #[error("invalid amount parameter")]
    InvalidAmount,

    #[error("unsupported currency: {0}")]
    UnsupportedBase(String),

    #[error("unsupported target currency: {0}")]
    UnsupportedTarget(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("failed to contact rates service")]
    RatesUnreachable,

    #[error("bad response from rates service")]
    RatesBadResponse,

    #[error("failed to persist rates")]
    Persist,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidJson
            | Self::InvalidRates(_)
            | Self::InvalidAmount
            | Self::UnsupportedBase(_)
            | Self::UnsupportedTarget(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::RatesUnreachable | Self::RatesBadResponse | Self::Persist => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), format!("{self}\n")).into_response()
    }
}

impl From<UpstreamError> for ApiError {
    fn from(e: UpstreamError) -> Self {
        match e {
            UpstreamError::Unreachable { .. } => Self::RatesUnreachable,
            UpstreamError::Status { .. } | UpstreamError::Decode { .. } => Self::RatesBadResponse,
        }
    }
}
