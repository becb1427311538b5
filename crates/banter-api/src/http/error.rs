//! Application error type mapping storage failures to HTTP responses.
//!
//! Every route failure becomes a generic 500 with a static, route-specific
//! message; the underlying error is logged server-side and never leaks to
//! the client.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use banter_types::error::RepositoryError;

/// A route failure carrying the static client-facing message and the
/// logged source error.
#[derive(Debug)]
pub struct AppError {
    context: &'static str,
    source: RepositoryError,
}

impl AppError {
    /// Wrap a repository error with the message the client will see.
    pub fn repository(context: &'static str, source: RepositoryError) -> Self {
        Self { context, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.source, "{}", self.context);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": self.context})),
        )
            .into_response()
    }
}
