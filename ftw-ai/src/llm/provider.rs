use serde_json::Value;

use crate::config::ChatProviderConfig;
use crate::error::{FtwError, Result};
use crate::llm::api::ChatApiClient;
use crate::llm::json::extract_json_object;

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatBackend {
    OpenAi,
    OpenRouter,
    OpenAiCompatible { base_url: String },
    Disabled { reason: String },
}

#[derive(Debug, Clone, Default)]
pub struct CompletionOptions {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

/// A chat-completion provider handle. Resolves the backend once from
/// configuration; an unusable configuration yields a `Disabled` backend that
/// reports unavailable instead of erroring at construction.
#[derive(Debug, Clone)]
pub struct ChatProvider {
    backend: ChatBackend,
    config: Option<ChatProviderConfig>,
}

impl ChatProvider {
    pub fn new(config: &ChatProviderConfig) -> Self {
        if config.api_key.is_none() {
            return Self::disabled("No API key configured");
        }

        let backend = match config.provider.to_lowercase().as_str() {
            "openai" => ChatBackend::OpenAi,
            "openrouter" => ChatBackend::OpenRouter,
            _ => {
                if let Some(base_url) = &config.base_url {
                    ChatBackend::OpenAiCompatible {
                        base_url: base_url.clone(),
                    }
                } else {
                    ChatBackend::Disabled {
                        reason: format!("Unknown provider: {}", config.provider),
                    }
                }
            }
        };

        Self {
            backend,
            config: Some(config.clone()),
        }
    }

    pub fn disabled(reason: &str) -> Self {
        Self {
            backend: ChatBackend::Disabled {
                reason: reason.to_string(),
            },
            config: None,
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self.backend, ChatBackend::Disabled { .. })
    }

    pub fn backend(&self) -> &ChatBackend {
        &self.backend
    }

    pub fn model(&self) -> Option<&str> {
        self.config.as_ref().map(|config| config.model.as_str())
    }

    pub fn base_url(&self) -> Option<&str> {
        match &self.backend {
            ChatBackend::OpenAi => Some(OPENAI_BASE_URL),
            ChatBackend::OpenRouter => Some(OPENROUTER_BASE_URL),
            ChatBackend::OpenAiCompatible { base_url } => Some(base_url),
            ChatBackend::Disabled { .. } => None,
        }
    }

    pub async fn complete(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
        options: Option<&CompletionOptions>,
    ) -> Result<String> {
        let (config, base_url) = self.usable()?;

        // The config base_url overrides the backend default, matching the
        // provider resolution above.
        let base_url = config.base_url.as_deref().unwrap_or(base_url);

        let client = ChatApiClient::new(config, base_url)?;
        client.complete(prompt, system_prompt, options).await
    }

    /// Complete and parse the first balanced JSON object out of the response
    /// text. Model chatter around the object is tolerated; a response with
    /// no object at all is a `Chat` error.
    pub async fn complete_json(
        &self,
        prompt: &str,
        options: Option<&CompletionOptions>,
    ) -> Result<Value> {
        let content = self.complete(prompt, None, options).await?;

        let block = extract_json_object(&content).ok_or_else(|| {
            tracing::warn!(
                response_preview = %content.chars().take(100).collect::<String>(),
                "No JSON object found in completion"
            );
            FtwError::Chat("No JSON object found in completion".to_string())
        })?;

        serde_json::from_str(block)
            .map_err(|e| FtwError::Chat(format!("Failed to parse JSON response: {e}")))
    }

    fn usable(&self) -> Result<(&ChatProviderConfig, &'static str)> {
        let default_base = match &self.backend {
            ChatBackend::OpenAi => OPENAI_BASE_URL,
            ChatBackend::OpenRouter => OPENROUTER_BASE_URL,
            ChatBackend::OpenAiCompatible { .. } => OPENAI_BASE_URL,
            ChatBackend::Disabled { reason } => {
                return Err(FtwError::ChatUnavailable(reason.clone()));
            }
        };

        let config = self
            .config
            .as_ref()
            .ok_or_else(|| FtwError::ChatUnavailable("No config available".to_string()))?;

        Ok((config, default_base))
    }
}
