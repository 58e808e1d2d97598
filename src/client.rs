//! Upstream completion endpoint client

use crate::config::LlmConfig;
use crate::message::Message;
use crate::{Error, Result};
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

/// Client for the OpenAI-style chat-completions endpoint.
///
/// One synchronous request per call, no retries. Construction fails fast when
/// the bearer credential is missing, before any network I/O.
pub struct CompletionClient {
    http: HttpClient,
    api_base: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl CompletionClient {
    /// Create a client from explicit configuration and a shared HTTP client
    pub fn new(http: HttpClient, config: &LlmConfig) -> Result<Self> {
        let api_key = config.require_api_key()?.to_string();
        Ok(CompletionClient {
            http,
            api_base: config.api_base.clone(),
            api_key,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }

    /// Send a chat completion request and return the extracted text.
    ///
    /// A non-2xx status is a hard failure carrying the status and body: error
    /// responses (401, 429, 500) must never degrade into empty text that
    /// breaks a downstream parse far from the root cause. A 2xx response with
    /// no extractable text fails with the full raw body attached.
    pub async fn complete(&self, messages: &[Message]) -> Result<String> {
        let url = format!("{}/chat/completions", self.api_base.trim_end_matches('/'));

        let request = ChatRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages: messages.to_vec(),
        };

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_else(|_| "(unreadable)".to_string());

        if !status.is_success() {
            return Err(Error::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|_| Error::EmptyContent(body.clone()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.is_empty())
            .ok_or(Error::EmptyContent(body))
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}
