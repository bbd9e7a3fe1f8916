#![allow(dead_code)]

use serde_json::{json, Value};

use ftw_ai::config::{
    CacheConfig, ChatProviderConfig, EmbeddingConfig, ScopingConfig, VectorConfig,
};

pub fn chat_config(base_url: &str) -> ChatProviderConfig {
    ChatProviderConfig {
        provider: "openai".to_string(),
        model: "gpt-4o-mini".to_string(),
        base_url: Some(base_url.to_string()),
        api_key: Some("test-key".to_string()),
        timeout_secs: 5,
    }
}

pub fn chat_config_without_key() -> ChatProviderConfig {
    ChatProviderConfig {
        provider: "openai".to_string(),
        model: "gpt-4o-mini".to_string(),
        base_url: None,
        api_key: None,
        timeout_secs: 5,
    }
}

pub fn embed_config(base_url: &str) -> EmbeddingConfig {
    EmbeddingConfig {
        provider: "openai".to_string(),
        model: "text-embedding-3-small".to_string(),
        base_url: Some(base_url.to_string()),
        api_key: Some("test-key".to_string()),
        timeout_secs: 5,
    }
}

pub fn embed_config_without_key() -> EmbeddingConfig {
    EmbeddingConfig {
        provider: "openai".to_string(),
        model: "text-embedding-3-small".to_string(),
        base_url: None,
        api_key: None,
        timeout_secs: 5,
    }
}

pub fn scoping_config(base_url: &str) -> ScopingConfig {
    ScopingConfig {
        model: "claude-3-5-sonnet-20241022".to_string(),
        api_key: Some("test-key".to_string()),
        base_url: base_url.to_string(),
        max_tokens: 1024,
        timeout_secs: 5,
    }
}

pub fn scoping_config_without_key() -> ScopingConfig {
    ScopingConfig {
        model: "claude-3-5-sonnet-20241022".to_string(),
        api_key: None,
        base_url: "https://api.anthropic.com/v1".to_string(),
        max_tokens: 1024,
        timeout_secs: 5,
    }
}

pub fn vector_config(base_url: &str) -> VectorConfig {
    VectorConfig {
        provider: "pinecone".to_string(),
        api_key: Some("test-key".to_string()),
        base_url: Some(base_url.to_string()),
        index_scopes: "job-scopes".to_string(),
        index_materials: "material-prices".to_string(),
        index_contractors: "contractors".to_string(),
        timeout_secs: 5,
    }
}

pub fn vector_config_unconfigured() -> VectorConfig {
    VectorConfig {
        provider: "pinecone".to_string(),
        api_key: None,
        base_url: None,
        index_scopes: "job-scopes".to_string(),
        index_materials: "material-prices".to_string(),
        index_contractors: "contractors".to_string(),
        timeout_secs: 5,
    }
}

pub fn cache_config() -> CacheConfig {
    CacheConfig {
        max_entries: 100,
        ttl_secs: 300,
    }
}

/// OpenAI-style chat completion body with the given assistant content.
pub fn completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1,
        "model": "gpt-4o-mini",
        "choices": [
            {
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": content
                },
                "finish_reason": "stop"
            }
        ],
        "usage": {
            "prompt_tokens": 1,
            "completion_tokens": 1,
            "total_tokens": 2
        }
    })
}

/// OpenAI-style embeddings body with one vector.
pub fn embeddings_body(vector: &[f32]) -> Value {
    json!({
        "object": "list",
        "data": [
            {
                "object": "embedding",
                "index": 0,
                "embedding": vector
            }
        ],
        "model": "text-embedding-3-small",
        "usage": {"prompt_tokens": 1, "total_tokens": 1}
    })
}

/// Anthropic-style messages body with one text block.
pub fn messages_body(text: &str) -> Value {
    json!({
        "id": "msg-test",
        "type": "message",
        "role": "assistant",
        "model": "claude-3-5-sonnet-20241022",
        "content": [
            {"type": "text", "text": text}
        ],
        "stop_reason": "end_turn",
        "usage": {"input_tokens": 1, "output_tokens": 1}
    })
}

/// Vector-search body in the Pinecone-style `matches` shape.
pub fn matches_body(matches: Value) -> Value {
    json!({ "matches": matches })
}
