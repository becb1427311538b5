//! Origin allow-list enforcement.
//!
//! Runs ahead of every route: requests with no `Origin` header (curl,
//! server-to-server) always pass; requests from an allowed origin pass and
//! gain the allow headers; anything else is rejected with 403 before any
//! route logic runs. `OPTIONS` preflights are answered directly.

use axum::Json;
use axum::extract::{Request, State};
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    HeaderValue, ORIGIN, VARY,
};
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::state::AppState;

const ALLOW_METHODS: &str = "GET, POST, OPTIONS, DELETE";
const ALLOW_HEADERS: &str = "Content-Type, Authorization";

/// Router-level middleware enforcing the configured origin allow-list.
pub async fn enforce(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let origin = request
        .headers()
        .get(ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let allowed = |o: &String| state.config.allowed_origins.contains(o);

    if request.method() == Method::OPTIONS {
        return match &origin {
            Some(o) if !allowed(o) => denied(o),
            _ => preflight_ok(origin.as_deref()),
        };
    }

    match origin {
        // Non-browser clients carry no Origin header and always pass
        None => next.run(request).await,
        Some(o) if allowed(&o) => {
            let mut response = next.run(request).await;
            if let Ok(value) = HeaderValue::from_str(&o) {
                response
                    .headers_mut()
                    .insert(ACCESS_CONTROL_ALLOW_ORIGIN, value);
                response
                    .headers_mut()
                    .append(VARY, HeaderValue::from_static("Origin"));
            }
            response
        }
        Some(o) => denied(&o),
    }
}

/// Answer a preflight directly, without reaching any route.
fn preflight_ok(origin: Option<&str>) -> Response {
    let allow_origin = origin
        .and_then(|o| HeaderValue::from_str(o).ok())
        .unwrap_or_else(|| HeaderValue::from_static("*"));

    (
        StatusCode::OK,
        [
            (ACCESS_CONTROL_ALLOW_ORIGIN, allow_origin),
            (
                ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static(ALLOW_METHODS),
            ),
            (
                ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static(ALLOW_HEADERS),
            ),
        ],
    )
        .into_response()
}

fn denied(origin: &str) -> Response {
    tracing::warn!(origin, "rejected cross-origin request");
    (
        StatusCode::FORBIDDEN,
        Json(json!({"error": "CORS origin denied"})),
    )
        .into_response()
}
