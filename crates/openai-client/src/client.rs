//! OpenAI-compatible chat completions HTTP client.

use crate::error::OpenAiError;
use crate::types::*;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Chat completions client.
///
/// The API key is stored using `SecretString` to prevent accidental
/// exposure in logs or debug output. The model and output length cap
/// are fixed at construction; every completion uses the same values.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: SecretString,
    model: String,
    max_tokens: u32,
}

impl OpenAiClient {
    /// Create a new chat completions client.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        max_tokens: u32,
        timeout: Duration,
    ) -> Result<Self, OpenAiError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: SecretString::new(api_key.into()),
            model: model.into(),
            max_tokens,
        })
    }

    /// Get the configured model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a single-message chat completion request.
    ///
    /// Returns the textual content of every returned choice, in
    /// response order, concatenated into one string. A non-success
    /// status is surfaced as [`OpenAiError::Api`] carrying the
    /// provider's status code; there is no retry.
    #[instrument(skip(self, query))]
    pub async fn complete(&self, query: &str) -> Result<String, OpenAiError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![Message::user(query)],
            max_tokens: Some(self.max_tokens),
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key.expose_secret()))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".into());
            warn!(status = status.as_u16(), "Chat completion request failed");
            return Err(OpenAiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        debug!("Response body: {}", &body[..body.len().min(200)]);
        let chat_response: ChatResponse = serde_json::from_str(&body)?;

        Ok(chat_response
            .choices
            .into_iter()
            .filter_map(|c| c.message.content)
            .collect())
    }
}
