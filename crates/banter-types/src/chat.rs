//! Chat session and message domain types.
//!
//! Ids are SQLite rowid integers (`INTEGER PRIMARY KEY AUTOINCREMENT`),
//! assigned by the store on insert. Timestamps are produced by the store
//! layer as RFC 3339 UTC.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::llm::MessageRole;

/// A named, timestamped conversation container owning an ordered
/// sequence of messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: i64,
    /// Optional display name. A blank name is normalized to `None`
    /// before it ever reaches the store.
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One turn in a conversation. Append-only: never mutated, deleted only
/// as a side effect of session deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: i64,
    pub session_id: i64,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
