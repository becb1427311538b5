//! Shared domain types for Banter.
//!
//! This crate contains the core domain types used across the Banter service:
//! chat sessions, messages, LLM request/response shapes, and their associated
//! error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod error;
pub mod llm;
