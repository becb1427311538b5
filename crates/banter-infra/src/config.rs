//! Environment-sourced process configuration.
//!
//! Every recognized option has a built-in default; the process starts
//! without any environment at all (a missing GROQ_API_KEY is warned
//! about at startup, and calls fail gracefully into the fallback reply).

use secrecy::SecretString;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DB_PATH: &str = "banter.db";
const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Resolved configuration for one `banterd` process.
pub struct Config {
    /// Listening port (`BANTER_PORT`).
    pub port: u16,
    /// Completion-provider key (`GROQ_API_KEY`). `None` means the key is
    /// absent; provider calls still run and fail into the fallback reply.
    pub groq_api_key: Option<SecretString>,
    /// Browser origins allowed to call the API: built-in defaults merged
    /// with `BANTER_ALLOWED_ORIGINS` (comma separated).
    pub allowed_origins: Vec<String>,
    /// Client-side API base substituted into the embedded page
    /// (`BANTER_API_BASE`). Empty means same origin.
    pub api_base: String,
    /// SQLite file path (`BANTER_DB_PATH`).
    pub db_path: String,
    /// Model id sent to the provider (`BANTER_MODEL`).
    pub model: String,
    /// Provider endpoint override (`GROQ_BASE_URL`).
    pub groq_base_url: String,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        let port = std::env::var("BANTER_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let groq_api_key = std::env::var("GROQ_API_KEY")
            .ok()
            .filter(|v| !v.is_empty())
            .map(SecretString::from);

        let extra_origins = std::env::var("BANTER_ALLOWED_ORIGINS").ok();

        Self {
            port,
            groq_api_key,
            allowed_origins: merge_origins(extra_origins.as_deref(), port),
            api_base: std::env::var("BANTER_API_BASE").unwrap_or_default(),
            db_path: std::env::var("BANTER_DB_PATH")
                .unwrap_or_else(|_| DEFAULT_DB_PATH.to_string()),
            model: std::env::var("BANTER_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            groq_base_url: std::env::var("GROQ_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GROQ_BASE_URL.to_string()),
        }
    }

    /// The sqlx connection URL for the configured database file.
    pub fn database_url(&self) -> String {
        format!("sqlite://{}?mode=rwc", self.db_path)
    }
}

/// Merge comma-separated extra origins ahead of the built-in defaults,
/// trimming entries, dropping blanks, and deduplicating.
///
/// The defaults cover the Vite dev server and the server's own origin
/// (browsers attach `Origin` to same-origin POSTs too).
fn merge_origins(extra: Option<&str>, port: u16) -> Vec<String> {
    let defaults = [
        "http://localhost:5173".to_string(),
        "http://127.0.0.1:5173".to_string(),
        format!("http://localhost:{port}"),
        format!("http://127.0.0.1:{port}"),
    ];

    let mut origins: Vec<String> = Vec::new();
    let extra_iter = extra
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    for origin in extra_iter.chain(defaults) {
        if !origins.contains(&origin) {
            origins.push(origin);
        }
    }

    origins
}
