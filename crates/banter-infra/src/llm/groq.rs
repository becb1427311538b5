//! GroqProvider -- concrete [`LlmProvider`] implementation for the Groq
//! OpenAI-compatible chat completions API (`/chat/completions`).
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use banter_core::llm::provider::LlmProvider;
use banter_types::llm::{CompletionRequest, CompletionResponse, LlmError, MessageRole};

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Groq LLM provider.
///
/// Implements [`LlmProvider`] against the OpenAI-compatible chat
/// completions endpoint. An absent or wrong API key surfaces as
/// [`LlmError::AuthenticationFailed`]; the proxy above converts every
/// error into the fixed fallback reply.
pub struct GroqProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl GroqProvider {
    /// Create a new Groq provider.
    ///
    /// `api_key` may be empty; calls are still attempted and fail with
    /// an authentication error, which the proxy absorbs.
    pub fn new(api_key: SecretString) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Convert a generic [`CompletionRequest`] into the OpenAI-compatible
    /// wire shape. The system instruction becomes the first wire message.
    fn to_wire_request(&self, request: &CompletionRequest) -> GroqRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);

        if let Some(system) = &request.system {
            messages.push(GroqMessage {
                role: MessageRole::System.to_string(),
                content: system.clone(),
            });
        }

        messages.extend(request.messages.iter().map(|m| GroqMessage {
            role: m.role.to_string(),
            content: m.content.clone(),
        }));

        GroqRequest {
            model: request.model.clone(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }
}

// GroqProvider intentionally does NOT derive Debug to prevent accidental
// exposure of internal state. The SecretString field ensures the API key
// is never printed, but we also omit Debug entirely.

impl LlmProvider for GroqProvider {
    fn name(&self) -> &str {
        "groq"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = self.to_wire_request(request);
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 => LlmError::AuthenticationFailed,
                429 => LlmError::RateLimited,
                500..=599 => LlmError::Overloaded(error_body),
                _ => LlmError::Provider {
                    message: format!("HTTP {status}: {error_body}"),
                },
            });
        }

        let groq_resp: GroqResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

        // First choice's text; empty when there are no choices. The proxy
        // substitutes its "no reply" text for empty content.
        let content = groq_resp
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        Ok(CompletionResponse {
            content,
            model: groq_resp.model.unwrap_or_else(|| request.model.clone()),
        })
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct GroqRequest {
    model: String,
    messages: Vec<GroqMessage>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
}

#[derive(Debug, Serialize)]
struct GroqMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct GroqResponse {
    #[serde(default)]
    choices: Vec<GroqChoice>,
    #[serde(default)]
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GroqChoice {
    message: GroqResponseMessage,
}

#[derive(Debug, Deserialize)]
struct GroqResponseMessage {
    #[serde(default)]
    content: Option<String>,
}
