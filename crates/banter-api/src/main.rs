//! Banter server entry point.
//!
//! Binary name: `banterd`
//!
//! Reads configuration from the environment, initializes the database and
//! services, then serves the HTTP API and the embedded web client.

mod http;
mod state;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use banter_infra::config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = Config::from_env();
    if config.groq_api_key.is_some() {
        info!("GROQ_API_KEY loaded");
    } else {
        warn!("GROQ_API_KEY is not set; assistant replies will use the fallback text");
    }

    let state = AppState::init(config).await?;

    let addr = format!("0.0.0.0:{}", state.config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(
        addr = %addr,
        allowed_origins = ?state.config.allowed_origins,
        "banterd listening"
    );

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
