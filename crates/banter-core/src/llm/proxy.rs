//! AiProxy -- turns a message history into exactly one reply string.
//!
//! The proxy is infallible by contract: a provider failure is logged and
//! converted into a fixed fallback string, which the caller persists as
//! the assistant's message. Failures become visible chat content, never
//! HTTP errors.

use banter_types::chat::ChatMessage;
use banter_types::llm::{CompletionRequest, Message};
use tracing::warn;

use crate::llm::provider::LlmProvider;

/// Fixed system instruction prepended to every completion request.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Returned when the provider call fails for any reason.
pub const FALLBACK_REPLY: &str =
    "AI is currently unavailable, your backend and DB are working \u{1F642}";

/// Returned when the provider succeeds but produces no content.
pub const NO_REPLY: &str = "No reply from AI";

const MAX_TOKENS: u32 = 2048;
const TEMPERATURE: f64 = 0.7;

/// Wraps an [`LlmProvider`] with the fixed prompt parameters and the
/// error-to-fallback conversion.
pub struct AiProxy<P: LlmProvider> {
    provider: P,
    model: String,
}

impl<P: LlmProvider> AiProxy<P> {
    pub fn new(provider: P, model: String) -> Self {
        Self { provider, model }
    }

    /// Compute one reply for the full prior message history.
    ///
    /// Never fails: provider errors yield the fallback text, an empty
    /// completion yields the "no reply" text.
    pub async fn reply(&self, history: &[ChatMessage]) -> String {
        let messages = history
            .iter()
            .map(|m| Message {
                role: m.role,
                content: m.content.clone(),
            })
            .collect();

        let request = CompletionRequest {
            model: self.model.clone(),
            messages,
            system: Some(SYSTEM_PROMPT.to_string()),
            max_tokens: MAX_TOKENS,
            temperature: Some(TEMPERATURE),
        };

        match self.provider.complete(&request).await {
            Ok(response) if response.content.is_empty() => NO_REPLY.to_string(),
            Ok(response) => response.content,
            Err(err) => {
                warn!(provider = self.provider.name(), error = %err, "completion failed, using fallback reply");
                FALLBACK_REPLY.to_string()
            }
        }
    }
}
