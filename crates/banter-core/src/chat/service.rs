//! Chat service orchestrating session lifecycle and message exchange.
//!
//! ChatService coordinates between the ChatRepository and the AiProxy:
//! creating and deleting sessions, and running the full send-message
//! sequence (persist user turn, compute reply, persist assistant turn).

use banter_types::chat::{ChatMessage, ChatSession};
use banter_types::error::RepositoryError;
use banter_types::llm::MessageRole;
use tracing::info;

use crate::chat::repository::ChatRepository;
use crate::llm::provider::LlmProvider;
use crate::llm::proxy::AiProxy;

/// Trim a requested session name, treating blank input as absent.
fn normalize_name(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Orchestrates chat session lifecycle and message exchange.
///
/// Generic over `ChatRepository` and `LlmProvider` to maintain clean
/// architecture (banter-core never depends on banter-infra).
pub struct ChatService<C: ChatRepository, P: LlmProvider> {
    repo: C,
    proxy: AiProxy<P>,
}

impl<C: ChatRepository, P: LlmProvider> ChatService<C, P> {
    /// Create a new chat service with the given repository and proxy.
    pub fn new(repo: C, proxy: AiProxy<P>) -> Self {
        Self { repo, proxy }
    }

    /// Create a session. Blank or whitespace-only names are stored as
    /// absent, not as an empty string.
    pub async fn create_session(
        &self,
        name: Option<&str>,
    ) -> Result<ChatSession, RepositoryError> {
        let session = self.repo.create_session(normalize_name(name).as_deref()).await?;
        info!(session_id = session.id, "created session");
        Ok(session)
    }

    /// List all sessions, newest-created first.
    pub async fn list_sessions(&self) -> Result<Vec<ChatSession>, RepositoryError> {
        self.repo.list_sessions().await
    }

    /// Delete a session and its messages. Succeeds for unknown ids.
    pub async fn delete_session(&self, session_id: i64) -> Result<(), RepositoryError> {
        self.repo.delete_session(session_id).await?;
        info!(session_id, "deleted session");
        Ok(())
    }

    /// Get the full thread for a session, ascending by id.
    pub async fn list_messages(
        &self,
        session_id: i64,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        self.repo.list_messages(session_id).await
    }

    /// Run one conversation turn and return the full updated thread.
    ///
    /// Sequence: persist the user message, load the full history, ask
    /// the proxy for a reply (which falls back to a fixed string on
    /// provider failure), persist the assistant message. The two inserts
    /// are deliberately not one transaction: a write transaction held
    /// across the outbound LLM call would serialize every writer behind
    /// network latency.
    pub async fn send_message(
        &self,
        session_id: i64,
        content: &str,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        self.repo
            .insert_message(session_id, MessageRole::User, content)
            .await?;

        let history = self.repo.list_messages(session_id).await?;
        let reply = self.proxy.reply(&history).await;

        self.repo
            .insert_message(session_id, MessageRole::Assistant, &reply)
            .await?;

        self.repo.list_messages(session_id).await
    }
}
