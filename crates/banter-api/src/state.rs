//! Application state wiring all services together.
//!
//! AppState holds the concrete service instance used by the HTTP handlers.
//! The service is generic over repository/provider traits, but AppState
//! pins it to the concrete infra implementations.

use std::sync::Arc;

use secrecy::SecretString;

use banter_core::chat::service::ChatService;
use banter_core::llm::proxy::AiProxy;
use banter_infra::config::Config;
use banter_infra::llm::groq::GroqProvider;
use banter_infra::sqlite::chat::SqliteChatRepository;
use banter_infra::sqlite::pool::DatabasePool;

/// Concrete type alias for the service generics pinned to infra implementations.
pub type ConcreteChatService = ChatService<SqliteChatRepository, GroqProvider>;

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub config: Arc<Config>,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: connect to the DB, wire services.
    pub async fn init(config: Config) -> anyhow::Result<Self> {
        let db_pool = DatabasePool::new(&config.database_url()).await?;
        tracing::info!(path = %config.db_path, "SQLite ready");

        let repo = SqliteChatRepository::new(db_pool.clone());

        // An absent key still builds a provider; its calls fail with an
        // authentication error that the proxy turns into the fallback reply.
        let api_key = config
            .groq_api_key
            .clone()
            .unwrap_or_else(|| SecretString::from(""));
        let provider = GroqProvider::new(api_key).with_base_url(config.groq_base_url.clone());
        let proxy = AiProxy::new(provider, config.model.clone());

        let chat_service = ChatService::new(repo, proxy);

        Ok(Self {
            chat_service: Arc::new(chat_service),
            config: Arc::new(config),
            db_pool,
        })
    }
}
