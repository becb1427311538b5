//! SQLite chat repository implementation.
//!
//! Implements `ChatRepository` from `banter-core` using sqlx with split
//! read/write pools: raw queries, private Row structs, writes on the
//! single-connection writer, reads on the reader pool.

use banter_core::chat::repository::ChatRepository;
use banter_types::chat::{ChatMessage, ChatSession};
use banter_types::error::RepositoryError;
use banter_types::llm::MessageRole;
use chrono::{DateTime, Utc};
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ChatRepository`.
pub struct SqliteChatRepository {
    pool: DatabasePool,
}

impl SqliteChatRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct ChatSessionRow {
    id: i64,
    name: Option<String>,
    created_at: String,
}

impl ChatSessionRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_session(self) -> Result<ChatSession, RepositoryError> {
        Ok(ChatSession {
            id: self.id,
            name: self.name,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

struct ChatMessageRow {
    id: i64,
    session_id: i64,
    role: String,
    content: String,
    created_at: String,
}

impl ChatMessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            session_id: row.try_get("session_id")?,
            role: row.try_get("role")?,
            content: row.try_get("content")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_message(self) -> Result<ChatMessage, RepositoryError> {
        let role: MessageRole = self
            .role
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;

        Ok(ChatMessage {
            id: self.id,
            session_id: self.session_id,
            role,
            content: self.content,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

// ---------------------------------------------------------------------------
// ChatRepository implementation
// ---------------------------------------------------------------------------

impl ChatRepository for SqliteChatRepository {
    async fn create_session(&self, name: Option<&str>) -> Result<ChatSession, RepositoryError> {
        let created_at = Utc::now();

        let result = sqlx::query("INSERT INTO sessions (name, created_at) VALUES (?, ?)")
            .bind(name)
            .bind(created_at.to_rfc3339())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(ChatSession {
            id: result.last_insert_rowid(),
            name: name.map(str::to_string),
            created_at,
        })
    }

    async fn list_sessions(&self) -> Result<Vec<ChatSession>, RepositoryError> {
        // id DESC breaks ties between sessions created within the same instant
        let rows = sqlx::query(
            "SELECT id, name, created_at FROM sessions ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut sessions = Vec::with_capacity(rows.len());
        for row in &rows {
            let session_row = ChatSessionRow::from_row(row)
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            sessions.push(session_row.into_session()?);
        }

        Ok(sessions)
    }

    async fn delete_session(&self, session_id: i64) -> Result<(), RepositoryError> {
        // One transaction so a crash cannot leave orphaned messages
        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        sqlx::query("DELETE FROM messages WHERE session_id = ?")
            .bind(session_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(session_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))
    }

    async fn insert_message(
        &self,
        session_id: i64,
        role: MessageRole,
        content: &str,
    ) -> Result<ChatMessage, RepositoryError> {
        let created_at = Utc::now();

        let result = sqlx::query(
            "INSERT INTO messages (session_id, role, content, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(session_id)
        .bind(role.to_string())
        .bind(content)
        .bind(created_at.to_rfc3339())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(ChatMessage {
            id: result.last_insert_rowid(),
            session_id,
            role,
            content: content.to_string(),
            created_at,
        })
    }

    async fn list_messages(&self, session_id: i64) -> Result<Vec<ChatMessage>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, session_id, role, content, created_at FROM messages WHERE session_id = ? ORDER BY id ASC",
        )
        .bind(session_id)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in &rows {
            let msg_row = ChatMessageRow::from_row(row)
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            messages.push(msg_row.into_message()?);
        }

        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_repo() -> SqliteChatRepository {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        SqliteChatRepository::new(DatabasePool::new(&url).await.unwrap())
    }

    #[tokio::test]
    async fn test_create_session_returns_generated_id() {
        let repo = test_repo().await;

        let first = repo.create_session(Some("first")).await.unwrap();
        let second = repo.create_session(None).await.unwrap();

        assert!(first.id > 0);
        assert!(second.id > first.id);
        assert_eq!(first.name.as_deref(), Some("first"));
        assert_eq!(second.name, None);
    }

    #[tokio::test]
    async fn test_list_sessions_newest_first() {
        let repo = test_repo().await;

        let a = repo.create_session(Some("a")).await.unwrap();
        let b = repo.create_session(Some("b")).await.unwrap();
        let c = repo.create_session(Some("c")).await.unwrap();

        let listed = repo.list_sessions().await.unwrap();
        let ids: Vec<i64> = listed.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![c.id, b.id, a.id]);
    }

    #[tokio::test]
    async fn test_list_messages_ascending_across_interleaved_sessions() {
        let repo = test_repo().await;

        let left = repo.create_session(Some("left")).await.unwrap();
        let right = repo.create_session(Some("right")).await.unwrap();

        repo.insert_message(left.id, MessageRole::User, "l1").await.unwrap();
        repo.insert_message(right.id, MessageRole::User, "r1").await.unwrap();
        repo.insert_message(left.id, MessageRole::Assistant, "l2").await.unwrap();
        repo.insert_message(right.id, MessageRole::Assistant, "r2").await.unwrap();
        repo.insert_message(left.id, MessageRole::User, "l3").await.unwrap();

        let messages = repo.list_messages(left.id).await.unwrap();
        let contents: Vec<&str> = messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["l1", "l2", "l3"]);
        assert!(messages.windows(2).all(|w| w[0].id < w[1].id));
        assert!(messages.iter().all(|m| m.session_id == left.id));
    }

    #[tokio::test]
    async fn test_delete_session_removes_its_messages() {
        let repo = test_repo().await;

        let kept = repo.create_session(Some("kept")).await.unwrap();
        let doomed = repo.create_session(Some("doomed")).await.unwrap();
        repo.insert_message(kept.id, MessageRole::User, "stay").await.unwrap();
        repo.insert_message(doomed.id, MessageRole::User, "go").await.unwrap();
        repo.insert_message(doomed.id, MessageRole::Assistant, "gone").await.unwrap();

        repo.delete_session(doomed.id).await.unwrap();

        assert!(repo.list_messages(doomed.id).await.unwrap().is_empty());
        let sessions = repo.list_sessions().await.unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].id, kept.id);
        assert_eq!(repo.list_messages(kept.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_unknown_session_succeeds() {
        let repo = test_repo().await;
        repo.delete_session(9999).await.unwrap();
    }

    #[tokio::test]
    async fn test_insert_message_unknown_session_fails() {
        let repo = test_repo().await;

        let result = repo.insert_message(42, MessageRole::User, "hi").await;
        assert!(matches!(result, Err(RepositoryError::Query(_))));
    }

    #[tokio::test]
    async fn test_list_messages_unknown_session_is_empty() {
        let repo = test_repo().await;
        assert!(repo.list_messages(123).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_message_roundtrip_preserves_role_and_timestamp() {
        let repo = test_repo().await;
        let session = repo.create_session(None).await.unwrap();

        let inserted = repo
            .insert_message(session.id, MessageRole::Assistant, "Hi there!")
            .await
            .unwrap();

        let loaded = repo.list_messages(session.id).await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, inserted.id);
        assert_eq!(loaded[0].role, MessageRole::Assistant);
        assert_eq!(loaded[0].created_at, inserted.created_at);
    }
}
