use axum::extract::{Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router, middleware};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::core::currency::{ConversionResult, RatesSource};
use crate::http::auth::{self, AuthGate};
use crate::http::error::ApiError;

#[derive(Clone)]
pub struct GatewayState {
    pub rates: Arc<dyn RatesSource>,
}

/// Missing parameters arrive as empty strings.
#[derive(Debug, Default, PartialEq)]
pub struct ConvertQuery {
    pub from: String,
    pub to: String,
    pub amount: String,
}

impl ConvertQuery {
    /// The first occurrence of a repeated parameter wins.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let first = |name: &str| {
            pairs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone())
                .unwrap_or_default()
        };
        ConvertQuery {
            from: first("from"),
            to: first("to"),
            amount: first("amount"),
        }
    }
}

/// `/health` is always public; `/convert` sits behind `gate`.
pub fn router(rates: Arc<dyn RatesSource>, gate: AuthGate) -> Router {
    let protected = Router::new()
        .route("/convert", get(convert))
        .route_layer(middleware::from_fn_with_state(gate, auth::require_auth));

    Router::new()
        .route("/health", get(health))
        .merge(protected)
        .with_state(GatewayState { rates })
}

async fn health() -> &'static str {
    "Gateway is up\n"
}

/// GET /convert?from=USD&to=EUR&amount=100
async fn convert(
    State(state): State<GatewayState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, ApiError> {
    let ConvertQuery { from, to, amount } = ConvertQuery::from_pairs(&pairs);
    let amount: f64 = amount
        .parse()
        .ok()
        .filter(|value: &f64| value.is_finite())
        .ok_or(ApiError::InvalidAmount)?;
    info!(%from, %to, amount, "Received conversion request");

    let rates = state.rates.fetch_rates().await.map_err(|e| {
        error!(error = %e, "Could not get rates");
        ApiError::from(e)
    })?;

    let Some(targets) = rates.targets(&from) else {
        warn!(%from, "Unsupported base currency");
        return Err(ApiError::UnsupportedBase(from));
    };
    let Some(&rate) = targets.get(&to) else {
        warn!(%from, %to, "Unsupported target currency");
        return Err(ApiError::UnsupportedTarget(to));
    };

    let result = ConversionResult::new(&from, &to, amount, rate);
    if !result.converted.is_finite() {
        warn!(amount, rate, "Converted amount out of range");
        return Err(ApiError::InvalidAmount);
    }
    info!(%from, %to, rate, converted = result.converted, "Converted");

    Ok((
        [(CONTENT_TYPE, "application/json; charset=utf-8")],
        Json(result),
    )
        .into_response())
}
