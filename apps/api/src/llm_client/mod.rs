//! LLM Client: the single point of entry for every chat-completion call.
//!
//! No other module talks to the completion endpoint directly. Callers hand in a
//! system prompt and a user prompt and get back the raw completion text, or one
//! of the `CompletionError` failure classes.
//!
//! Retry policy: only HTTP 429 is retried (3 attempts, linear 1s/2s backoff).
//! Every other failure surfaces on first occurrence.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, warn};

pub mod prompts;

pub const DEFAULT_API_URL: &str = "https://api.deepseek.com/v1/chat/completions";
/// The model used for all completion calls. Hardcoded to keep output shape stable.
pub const MODEL: &str = "deepseek-chat";
const TEMPERATURE: f64 = 0.7;
const MAX_TOKENS: u32 = 1500;
pub const MAX_ATTEMPTS: u32 = 3;
const BACKOFF_STEP_MS: u64 = 1000;
const HTTP_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    #[error("Completion API key is not configured")]
    Config,

    #[error("Unauthorized: completion API rejected the credential (status {status})")]
    Auth { status: u16 },

    #[error("Rate limit exceeded after {attempts} attempts")]
    RateLimited { attempts: u32 },

    #[error("Server error: {status} - {body}")]
    Server { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response format: {0}")]
    Protocol(String),
}

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub temperature: f64,
    pub max_tokens: u32,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Token counts are logged only; servers that omit them still succeed.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

/// Status and raw body of one HTTP exchange with the completion endpoint.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// Moves a request over the wire. Implementations only fail with
/// `CompletionError::Network`; status classification happens in `LlmClient`.
#[async_trait]
pub trait CompletionTransport: Send + Sync {
    async fn send(
        &self,
        api_key: &str,
        request: &ChatCompletionRequest<'_>,
    ) -> Result<TransportResponse, CompletionError>;
}

/// reqwest-backed transport for the OpenAI-compatible chat completions API.
pub struct HttpTransport {
    client: Client,
    url: String,
}

impl HttpTransport {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            url: url.into(),
        }
    }
}

#[async_trait]
impl CompletionTransport for HttpTransport {
    async fn send(
        &self,
        api_key: &str,
        request: &ChatCompletionRequest<'_>,
    ) -> Result<TransportResponse, CompletionError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| CompletionError::Network(format!("failed to read body: {e}")))?;

        Ok(TransportResponse { status, body })
    }
}

#[derive(Clone)]
pub struct LlmClient {
    transport: Arc<dyn CompletionTransport>,
    api_key: Option<String>,
}

impl LlmClient {
    /// Client for the live endpoint. A missing or blank key is not an error here:
    /// every call then fails with `CompletionError::Config`.
    pub fn new(api_key: Option<String>, api_url: &str) -> Self {
        Self::with_transport(Arc::new(HttpTransport::new(api_url)), api_key)
    }

    pub fn with_transport(transport: Arc<dyn CompletionTransport>, api_key: Option<String>) -> Self {
        Self {
            transport,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Sends one system + user prompt pair and returns `choices[0].message.content`.
    pub async fn complete(&self, system: &str, prompt: &str) -> Result<String, CompletionError> {
        let Some(api_key) = self.api_key.as_deref() else {
            error!("Missing API key: DEEPSEEK_API environment variable is not set");
            return Err(CompletionError::Config);
        };

        let request = ChatCompletionRequest {
            model: MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        for attempt in 0..MAX_ATTEMPTS {
            if attempt > 0 {
                // Linear backoff: 1s, 2s
                let delay = Duration::from_millis(BACKOFF_STEP_MS * u64::from(attempt));
                warn!(
                    "Rate limited, retrying after {}ms (attempt {}/{})",
                    delay.as_millis(),
                    attempt + 1,
                    MAX_ATTEMPTS
                );
                tokio::time::sleep(delay).await;
            }

            debug!("Sending completion request (attempt {})", attempt + 1);
            let response = self.transport.send(api_key, &request).await?;

            if response.status == 429 {
                warn!("Completion API returned 429: {}", response.body);
                continue;
            }

            return read_completion(response);
        }

        Err(CompletionError::RateLimited {
            attempts: MAX_ATTEMPTS,
        })
    }
}

/// Classifies a non-429 response and pulls out the completion text.
fn read_completion(response: TransportResponse) -> Result<String, CompletionError> {
    let TransportResponse { status, body } = response;

    match status {
        200..=299 => {}
        401 | 403 => {
            error!("Completion API rejected credential: {status}");
            return Err(CompletionError::Auth { status });
        }
        s if s >= 500 => {
            error!("Completion API server error {s}: {body}");
            return Err(CompletionError::Server { status: s, body });
        }
        s => {
            error!("Completion API returned unexpected status {s}: {body}");
            return Err(CompletionError::Protocol(format!(
                "unexpected status {s}: {body}"
            )));
        }
    }

    let parsed: ChatCompletionResponse = serde_json::from_str(&body)
        .map_err(|e| CompletionError::Protocol(format!("malformed response body: {e}")))?;

    if let Some(usage) = &parsed.usage {
        debug!(
            "Completion succeeded: prompt_tokens={}, completion_tokens={}",
            usage.prompt_tokens, usage.completion_tokens
        );
    }

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| {
            CompletionError::Protocol("missing choices[0].message.content".to_string())
        })
}
