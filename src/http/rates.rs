use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::header::ALLOW;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::core::table::RateTable;
use crate::core::validate::validate;
use crate::http::error::ApiError;
use crate::store::RateStore;

/// `/health` and `/rates` for the rates service.
pub fn router(store: Arc<RateStore>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/rates",
            get(get_rates).post(post_rates).head(head_rates),
        )
        .with_state(store)
}

async fn health() -> &'static str {
    "Rates service is up\n"
}

/// `get` would otherwise answer HEAD too.
async fn head_rates() -> impl IntoResponse {
    (StatusCode::METHOD_NOT_ALLOWED, [(ALLOW, "GET,POST")])
}

/// GET /rates: the current table. Never fails.
async fn get_rates(State(store): State<Arc<RateStore>>) -> Json<RateTable> {
    info!("GET /rates");
    Json(store.load().await)
}

/// POST /rates: validate, then merge into the saved snapshot.
async fn post_rates(
    State(store): State<Arc<RateStore>>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    info!(bytes = body.len(), "POST /rates");

    let incoming = RateTable::from_json(&body).map_err(|e| {
        warn!(error = %e, "Rejected rates update");
        ApiError::InvalidJson
    })?;
    validate(&incoming).inspect_err(|e| warn!(error = %e, "Rejected rates update"))?;

    store.apply_update(incoming).await.map_err(|e| {
        error!(error = %e, "Rates update was not persisted");
        ApiError::Persist
    })?;

    Ok(Json(json!({ "message": "rates updated" })))
}
