//! LlmProvider trait definition.
//!
//! This is the abstraction the AI proxy talks to. Uses native async fn
//! in traits (RPITIT, Rust 2024 edition).
//!
//! Implementations live in banter-infra (e.g., `GroqProvider`).

use banter_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for LLM provider backends.
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "groq").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
