use std::time::Duration;

use crate::cache::TtlCache;
use crate::config::{CacheConfig, EmbeddingConfig};
use crate::embeddings::api::EmbeddingApiClient;
use crate::models::Embedding;

/// Inputs longer than this are truncated before hitting the provider.
const MAX_INPUT_CHARS: usize = 8000;

/// Memoized hosted-embeddings provider. `embed` never fails: disabled,
/// unconfigured, blank-input and provider-error paths all return the
/// [`Embedding::none`] sentinel.
#[derive(Clone)]
pub struct EmbeddingProvider {
    config: EmbeddingConfig,
    enabled: bool,
    cache: TtlCache<Embedding>,
}

impl EmbeddingProvider {
    pub fn new(config: &EmbeddingConfig, enabled: bool, cache: &CacheConfig) -> Self {
        Self {
            config: config.clone(),
            enabled,
            cache: TtlCache::new(cache.max_entries, Duration::from_secs(cache.ttl_secs)),
        }
    }

    pub fn is_available(&self) -> bool {
        self.enabled && self.config.api_key.is_some()
    }

    pub async fn embed(&self, text: &str) -> Embedding {
        if !self.is_available() || text.trim().is_empty() {
            return Embedding::none();
        }

        let truncated = truncate_chars(text, MAX_INPUT_CHARS);

        if let Some(cached) = self.cache.get(truncated) {
            tracing::debug!(len = truncated.len(), "Embedding cache hit");
            return cached;
        }

        let client = match EmbeddingApiClient::new(&self.config) {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!(error = %e, "Embedding client init failed");
                return Embedding::none();
            }
        };

        match client.embed(truncated).await {
            Ok(vector) => {
                let embedding = Embedding {
                    vector,
                    model: self.config.model.clone(),
                };
                self.cache.insert(truncated.to_string(), embedding.clone());
                embedding
            }
            Err(e) => {
                tracing::warn!(error = %e, "Embedding request failed");
                Embedding::none()
            }
        }
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((boundary, _)) => &text[..boundary],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn embed_config(key: Option<&str>) -> EmbeddingConfig {
        EmbeddingConfig {
            provider: "openai".to_string(),
            model: "text-embedding-3-small".to_string(),
            base_url: None,
            api_key: key.map(str::to_string),
            timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn test_disabled_switch_returns_sentinel() {
        let provider = EmbeddingProvider::new(
            &embed_config(Some("k")),
            false,
            &CacheConfig::default(),
        );
        assert_eq!(provider.embed("some text").await, Embedding::none());
    }

    #[tokio::test]
    async fn test_missing_key_returns_sentinel() {
        let provider = EmbeddingProvider::new(&embed_config(None), true, &CacheConfig::default());
        assert!(!provider.is_available());
        assert_eq!(provider.embed("some text").await, Embedding::none());
    }

    #[tokio::test]
    async fn test_blank_input_returns_sentinel() {
        let provider =
            EmbeddingProvider::new(&embed_config(Some("k")), true, &CacheConfig::default());
        assert_eq!(provider.embed("").await, Embedding::none());
        assert_eq!(provider.embed("   \n").await, Embedding::none());
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let text = "é".repeat(10);
        assert_eq!(truncate_chars(&text, 4), "éééé");
        assert_eq!(truncate_chars("short", 8000), "short");
    }
}
