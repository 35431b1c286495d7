//! DeepSeek API integration for commit message generation
//!
//! One chat-completions request per invocation: the prompt goes out as a
//! single user message, `choices[0].message.content` comes back as the
//! commit message. Transient failures (transport errors, 429, 5xx) get
//! exactly one extra attempt; credential and parse failures are terminal.

use serde::{Deserialize, Serialize};
use tokio::time::{Duration, sleep};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::ApiError;

/// HTTP client timeout for the completion request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Pause before the single retry attempt
const RETRY_DELAY: Duration = Duration::from_secs(2);

/// Commit messages are short; cap the completion accordingly
const MAX_COMPLETION_TOKENS: u32 = 200;

/// One message in a chat exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Client for the DeepSeek chat-completions endpoint
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl ApiClient {
    /// Build a client from the loaded configuration
    ///
    /// # Errors
    ///
    /// * `ApiError::MissingApiKey` if no key is configured
    pub fn new(config: &Config) -> Result<ApiClient, ApiError> {
        if config.api_key.trim().is_empty() {
            return Err(ApiError::MissingApiKey);
        }
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(ApiClient {
            http,
            base_url: config.api_base_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    /// Generate a commit message from the given prompt
    ///
    /// # Errors
    ///
    /// * `ApiError::Unauthorized` on HTTP 401
    /// * `ApiError::RateLimited` on HTTP 429 after the retry
    /// * `ApiError::ServerError` on HTTP 5xx after the retry
    /// * `ApiError::Request` on transport failure or timeout after the retry
    /// * `ApiError::InvalidResponse` if the body has no usable message
    pub async fn generate(&self, prompt: &str) -> Result<String, ApiError> {
        match self.request(prompt).await {
            Ok(message) => Ok(message),
            Err(e) if is_transient(&e) => {
                warn!(error = %e, "completion request failed, retrying once");
                sleep(RETRY_DELAY).await;
                self.request(prompt).await
            }
            Err(e) => Err(e),
        }
    }

    /// Issue a single request and parse the response
    async fn request(&self, prompt: &str) -> Result<String, ApiError> {
        let payload = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: self.temperature,
            max_tokens: MAX_COMPLETION_TOKENS,
            stream: false,
        };

        debug!(url = %self.base_url, model = %self.model, "sending completion request");
        let response = self
            .http
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        match status.as_u16() {
            200..=299 => {}
            401 => return Err(ApiError::Unauthorized),
            429 => return Err(ApiError::RateLimited),
            500..=599 => {
                return Err(ApiError::ServerError {
                    status: status.as_u16(),
                });
            }
            _ => {
                let body = response.text().await.unwrap_or_default();
                return Err(ApiError::InvalidResponse(format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    body.chars().take(200).collect::<String>()
                )));
            }
        }

        let body = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| ApiError::InvalidResponse(format!("malformed body: {e}")))?;

        let content = parsed
            .choices
            .first()
            .map(|choice| choice.message.content.as_str())
            .ok_or_else(|| ApiError::InvalidResponse("response contains no choices".to_string()))?;

        let message = clean_message(content);
        if message.is_empty() {
            return Err(ApiError::InvalidResponse(
                "response message is empty".to_string(),
            ));
        }
        Ok(message)
    }
}

/// Whether an error is worth the single retry
fn is_transient(error: &ApiError) -> bool {
    match error {
        ApiError::RateLimited | ApiError::ServerError { .. } => true,
        ApiError::Request(e) => e.is_timeout() || e.is_connect(),
        _ => false,
    }
}

/// Strip code-fence markers and blank lines from the model output
///
/// Models occasionally wrap the message in a ``` block despite the prompt
/// asking for plain text.
pub fn clean_message(raw: &str) -> String {
    let mut message = raw.trim().to_string();

    if message.starts_with("```") {
        let lines: Vec<&str> = message.lines().collect();
        if lines.len() > 2 {
            message = lines[1..lines.len() - 1].join("\n");
        } else {
            message = message.replace("```", "").trim().to_string();
        }
    }

    message
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
