use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
        CreateChatCompletionResponse,
    },
    Client,
};

use crate::config::ChatProviderConfig;
use crate::error::{FtwError, Result};
use crate::llm::provider::CompletionOptions;

/// Low-level client for an OpenAI-style chat-completion endpoint.
#[derive(Clone)]
pub struct ChatApiClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl ChatApiClient {
    pub fn new(config: &ChatProviderConfig, base_url: &str) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| FtwError::ChatUnavailable("No API key configured".to_string()))?;

        let openai_config = OpenAIConfig::new()
            .with_api_base(base_url.to_string())
            .with_api_key(api_key);

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|error| FtwError::Chat(format!("Failed to create HTTP client: {error}")))?;

        // async-openai retries 429/5xx with exponential backoff on its own,
        // for up to 15 minutes by default. This layer never retries: cap the
        // backoff at zero elapsed time so every call is a single attempt and
        // failures fall through to the caller's fallback path.
        let backoff = backoff::ExponentialBackoff {
            max_elapsed_time: Some(Duration::ZERO),
            ..Default::default()
        };

        let client = Client::with_config(openai_config)
            .with_http_client(http_client)
            .with_backoff(backoff);

        Ok(Self {
            client,
            model: config.model.clone(),
        })
    }

    pub async fn complete(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
        options: Option<&CompletionOptions>,
    ) -> Result<String> {
        if prompt.trim().is_empty() {
            return Err(FtwError::Validation("Prompt cannot be empty".to_string()));
        }

        let request = self.build_request(prompt, system_prompt, options)?;

        match self.client.chat().create(request).await {
            Ok(response) => Self::extract_content(response),
            Err(error) => Err(Self::map_openai_error(error)),
        }
    }

    fn build_request(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
        options: Option<&CompletionOptions>,
    ) -> Result<CreateChatCompletionRequest> {
        let mut messages = Vec::new();

        if let Some(system_prompt) = system_prompt.filter(|value| !value.trim().is_empty()) {
            messages.push(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system_prompt)
                    .build()
                    .map_err(|error| {
                        FtwError::Validation(format!("Invalid system prompt: {error}"))
                    })?
                    .into(),
            );
        }

        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()
                .map_err(|error| FtwError::Validation(format!("Invalid user prompt: {error}")))?
                .into(),
        );

        let mut request = CreateChatCompletionRequestArgs::default();
        request.model(self.model.clone()).messages(messages);

        if let Some(options) = options {
            if let Some(temperature) = options.temperature {
                request.temperature(temperature);
            }
            if let Some(max_tokens) = options.max_tokens {
                request.max_tokens(max_tokens);
            }
        }

        request
            .build()
            .map_err(|error| FtwError::Validation(format!("Invalid completion request: {error}")))
    }

    fn extract_content(response: CreateChatCompletionResponse) -> Result<String> {
        let message = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| FtwError::Chat("Response contained no choices".to_string()))?
            .message
            .content
            .unwrap_or_default();

        if message.trim().is_empty() {
            return Err(FtwError::Chat("Response contained empty content".to_string()));
        }

        Ok(message)
    }

    fn map_openai_error(error: OpenAIError) -> FtwError {
        match error {
            OpenAIError::Reqwest(reqwest_error) => {
                FtwError::Chat(format!("Request failed: {reqwest_error}"))
            }
            OpenAIError::ApiError(api_error) => FtwError::Chat(format!("API error: {api_error}")),
            OpenAIError::JSONDeserialize(err) => {
                FtwError::Chat(format!("Failed to parse response: {err}"))
            }
            OpenAIError::InvalidArgument(message) => FtwError::Validation(message),
            other => FtwError::Chat(other.to_string()),
        }
    }
}
