use thiserror::Error;

#[derive(Error, Debug)]
pub enum FtwError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Chat completion error: {0}")]
    Chat(String),

    #[error("Chat provider unavailable: {0}")]
    ChatUnavailable(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Vector search error: {0}")]
    VectorSearch(String),

    #[error("Vector search provider is not configured")]
    VectorUnconfigured,

    #[error("Scoping error: {0}")]
    Scoping(String),

    #[error("AI service not available")]
    AiUnavailable,

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, FtwError>;
