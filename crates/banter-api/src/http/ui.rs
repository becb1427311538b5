//! Embedded single-page web client.
//!
//! The page is compiled in with `include_str!`; the only serve-time
//! substitution is the client-side API base (empty = same origin).

use axum::extract::State;
use axum::response::Html;

use crate::state::AppState;

const PAGE: &str = include_str!("ui.html");

/// GET / - Serve the chat client.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(PAGE.replace("__API_BASE__", &state.config.api_base))
}
