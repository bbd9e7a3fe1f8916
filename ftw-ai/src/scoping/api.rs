use reqwest::{header::HeaderValue, Client};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::ScopingConfig;
use crate::error::{FtwError, Result};

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

/// Client for a messages-style (Anthropic-compatible) completion endpoint,
/// used by scope generation.
#[derive(Clone)]
pub struct MessagesApiClient {
    client: Client,
    base_url: String,
    api_key: String,
    max_tokens: u32,
}

impl MessagesApiClient {
    pub fn new(config: &ScopingConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| FtwError::Scoping("No scoping API key configured".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FtwError::Scoping(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            max_tokens: config.max_tokens,
        })
    }

    /// Send one user message and return the first text block of the reply.
    pub async fn complete(&self, model: &str, prompt: &str) -> Result<String> {
        let request = MessagesRequest {
            model,
            max_tokens: self.max_tokens,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let api_key = HeaderValue::from_str(&self.api_key)
            .map_err(|e| FtwError::Scoping(format!("Invalid API key header: {e}")))?;

        let url = format!("{}/messages", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| FtwError::Scoping(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FtwError::Scoping(format!("API error {status}: {body}")));
        }

        let body: MessagesResponse = response
            .json()
            .await
            .map_err(|e| FtwError::Scoping(format!("Failed to parse response: {e}")))?;

        let text = body
            .content
            .into_iter()
            .next()
            .map(|block| block.text)
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(FtwError::Scoping("Response contained no text".to_string()));
        }

        Ok(text)
    }
}
