//! Axum router configuration with middleware.
//!
//! All API routes are under `/api`; the embedded client is served at `/`.
//! Middleware: origin allow-list enforcement, request tracing.

use axum::Router;
use axum::middleware;
use axum::routing::{delete, get};
use tower_http::trace::TraceLayer;

use crate::http::{cors, handlers, ui};
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(handlers::health::health))
        .route(
            "/sessions",
            get(handlers::session::list_sessions).post(handlers::session::create_session),
        )
        .route("/sessions/{id}", delete(handlers::session::delete_session))
        .route(
            "/messages",
            get(handlers::message::list_messages).post(handlers::message::send_message),
        );

    Router::new()
        .nest("/api", api_routes)
        .route("/", get(ui::index))
        .layer(middleware::from_fn_with_state(state.clone(), cors::enforce))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use banter_infra::config::Config;
    use tower::ServiceExt;

    const ALLOWED: &str = "http://localhost:5173";
    const DISALLOWED: &str = "https://evil.example";

    /// State backed by a throwaway SQLite file, with the provider pointed
    /// at an unroutable address so every completion takes the fallback path.
    async fn test_state() -> AppState {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);

        let config = Config {
            port: 5000,
            groq_api_key: None,
            allowed_origins: vec![ALLOWED.to_string(), "http://127.0.0.1:5173".to_string()],
            api_base: String::new(),
            db_path: db_path.display().to_string(),
            model: "test-model".to_string(),
            groq_base_url: "http://127.0.0.1:1".to_string(),
        };

        AppState::init(config).await.unwrap()
    }

    async fn send(
        state: &AppState,
        method: Method,
        uri: &str,
        origin: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(origin) = origin {
            builder = builder.header(header::ORIGIN, origin);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = build_router(state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 1_000_000).await.unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn test_health_reports_allow_list() {
        let state = test_state().await;
        let (status, body) = send(&state, Method::GET, "/api/health", None, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["allowed_origins"][0], ALLOWED);
    }

    #[tokio::test]
    async fn test_create_session_blank_name_stored_unset() {
        let state = test_state().await;

        let (status, body) = send(
            &state,
            Method::POST,
            "/api/sessions",
            None,
            Some(serde_json::json!({"name": "  "})),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert!(body["session"]["name"].is_null());
        let id = body["session"]["id"].as_i64().unwrap();

        let (status, body) = send(&state, Method::GET, "/api/sessions", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sessions"][0]["id"], id);
    }

    #[tokio::test]
    async fn test_sessions_listed_newest_first() {
        let state = test_state().await;

        for name in ["one", "two", "three"] {
            send(
                &state,
                Method::POST,
                "/api/sessions",
                None,
                Some(serde_json::json!({"name": name})),
            )
            .await;
        }

        let (_, body) = send(&state, Method::GET, "/api/sessions", None, None).await;
        let names: Vec<&str> = body["sessions"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["three", "two", "one"]);
    }

    #[tokio::test]
    async fn test_send_message_unreachable_provider_persists_fallback() {
        let state = test_state().await;

        let (_, body) = send(
            &state,
            Method::POST,
            "/api/sessions",
            None,
            Some(serde_json::json!({"name": "talk"})),
        )
        .await;
        let session_id = body["session"]["id"].as_i64().unwrap();

        let (status, body) = send(
            &state,
            Method::POST,
            "/api/messages",
            None,
            Some(serde_json::json!({"sessionId": session_id, "content": "hi"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "user");
        assert_eq!(messages[0]["content"], "hi");
        assert_eq!(messages[1]["role"], "assistant");
        assert_eq!(
            messages[1]["content"],
            banter_core::llm::proxy::FALLBACK_REPLY
        );
    }

    #[tokio::test]
    async fn test_delete_session_then_messages_empty() {
        let state = test_state().await;

        let (_, body) = send(
            &state,
            Method::POST,
            "/api/sessions",
            None,
            Some(serde_json::json!({})),
        )
        .await;
        let session_id = body["session"]["id"].as_i64().unwrap();

        send(
            &state,
            Method::POST,
            "/api/messages",
            None,
            Some(serde_json::json!({"sessionId": session_id, "content": "hi"})),
        )
        .await;

        let (status, body) = send(
            &state,
            Method::DELETE,
            &format!("/api/sessions/{session_id}"),
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let (status, body) = send(
            &state,
            Method::GET,
            &format!("/api/messages?sessionId={session_id}"),
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["messages"].as_array().unwrap().is_empty());

        let (_, body) = send(&state, Method::GET, "/api/sessions", None, None).await;
        assert!(body["sessions"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_session_acknowledged() {
        let state = test_state().await;
        let (status, body) =
            send(&state, Method::DELETE, "/api/sessions/9999", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
    }

    #[tokio::test]
    async fn test_disallowed_origin_rejected_without_side_effects() {
        let state = test_state().await;

        let (status, body) = send(
            &state,
            Method::POST,
            "/api/sessions",
            Some(DISALLOWED),
            Some(serde_json::json!({"name": "sneaky"})),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "CORS origin denied");

        // Nothing was created
        let (_, body) = send(&state, Method::GET, "/api/sessions", None, None).await;
        assert!(body["sessions"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_allowed_origin_passes_and_gains_allow_header() {
        let state = test_state().await;

        let request = Request::builder()
            .method(Method::GET)
            .uri("/api/health")
            .header(header::ORIGIN, ALLOWED)
            .body(Body::empty())
            .unwrap();
        let response = build_router(state.clone()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            ALLOWED
        );
        assert_eq!(response.headers().get(header::VARY).unwrap(), "Origin");
    }

    #[tokio::test]
    async fn test_preflight_allowed_origin_answered_directly() {
        let state = test_state().await;

        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/messages")
            .header(header::ORIGIN, ALLOWED)
            .body(Body::empty())
            .unwrap();
        let response = build_router(state.clone()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            ALLOWED
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).unwrap(),
            "GET, POST, OPTIONS, DELETE"
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_HEADERS).unwrap(),
            "Content-Type, Authorization"
        );
    }

    #[tokio::test]
    async fn test_preflight_disallowed_origin_rejected() {
        let state = test_state().await;
        let (status, _) = send(
            &state,
            Method::OPTIONS,
            "/api/messages",
            Some(DISALLOWED),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_index_serves_embedded_client() {
        let state = test_state().await;

        let request = Request::builder()
            .uri("/")
            .body(Body::empty())
            .unwrap();
        let response = build_router(state.clone()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), 1_000_000).await.unwrap();
        let page = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(page.contains("<title>Banter</title>"));
        // The placeholder is substituted at serve time
        assert!(page.contains("const API_BASE = \"\""));
        assert!(!page.contains("__API_BASE__"));
    }
}
