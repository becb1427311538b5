//! ChatRepository trait definition.
//!
//! Provides CRUD operations for chat sessions and messages.

use banter_types::chat::{ChatMessage, ChatSession};
use banter_types::error::RepositoryError;
use banter_types::llm::MessageRole;

/// Repository trait for chat session and message persistence.
///
/// Implementations live in banter-infra (e.g., `SqliteChatRepository`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait ChatRepository: Send + Sync {
    /// Create a new session with an already-normalized name (blank names
    /// are `None` by the time they reach the store). Returns the full
    /// record including the generated id.
    fn create_session(
        &self,
        name: Option<&str>,
    ) -> impl std::future::Future<Output = Result<ChatSession, RepositoryError>> + Send;

    /// List all sessions, newest-created first.
    fn list_sessions(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<ChatSession>, RepositoryError>> + Send;

    /// Delete a session and its messages. Succeeds whether or not the
    /// id existed.
    fn delete_session(
        &self,
        session_id: i64,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Append one message to a session. Returns the full record
    /// including the generated id.
    fn insert_message(
        &self,
        session_id: i64,
        role: MessageRole,
        content: &str,
    ) -> impl std::future::Future<Output = Result<ChatMessage, RepositoryError>> + Send;

    /// Get messages for a session, ascending by id. Empty for unknown
    /// session ids.
    fn list_messages(
        &self,
        session_id: i64,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, RepositoryError>> + Send;
}
