use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use crate::core::config::GatewayConfig;
use crate::http::error::ApiError;

/// Single shared-secret gate in front of the protected gateway routes.
#[derive(Clone)]
pub struct AuthGate {
    expected: String,
    disabled: bool,
}

impl AuthGate {
    pub fn new(api_key: &str, disabled: bool) -> Self {
        AuthGate {
            expected: format!("Bearer {api_key}"),
            disabled,
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// `header` is the raw `Authorization` value, if any.
    pub fn allows(&self, header: Option<&str>) -> bool {
        self.disabled || constant_time_eq(header.unwrap_or("").as_bytes(), self.expected.as_bytes())
    }
}

impl From<&GatewayConfig> for AuthGate {
    fn from(config: &GatewayConfig) -> Self {
        Self::new(&config.api_key, config.disable_auth)
    }
}

/// Axum middleware: require `Authorization: Bearer <api_key>` unless the gate is disabled.
pub async fn require_auth(State(gate): State<AuthGate>, request: Request, next: Next) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());

    if gate.allows(header.as_deref()) {
        return next.run(request).await;
    }

    warn!(token = ?header, path = %request.uri().path(), "Rejected request: bad credentials");
    ApiError::Unauthorized.into_response()
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |diff, (x, y)| diff | (x ^ y)) == 0
}
