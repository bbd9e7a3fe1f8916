use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A text embedding from the hosted embeddings provider. The empty vector
/// with model `"none"` is the no-op sentinel returned whenever embeddings
/// are disabled, unconfigured, or the provider call fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding {
    pub vector: Vec<f32>,
    pub model: String,
}

impl Embedding {
    pub fn none() -> Self {
        Self {
            vector: Vec::new(),
            model: "none".to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.vector.is_empty()
    }
}

/// A document retrieved from a vector index: id, similarity score, and the
/// provider-side metadata payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedDoc {
    pub id: String,
    pub score: f32,
    #[serde(default)]
    pub metadata: Value,
}

/// Retrieval context assembled for a job before scope generation. All
/// fields may be empty; derived statistics are optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RagContext {
    pub similar_scopes: Vec<RetrievedDoc>,
    pub material_pricing: Vec<RetrievedDoc>,
    pub suggested_contractors: Vec<RetrievedDoc>,
    pub average_price: Option<u32>,
    pub typical_timeframe: Option<String>,
}

impl RagContext {
    /// The short-circuit shape used when RAG is disabled or the embedding
    /// came back empty.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.similar_scopes.is_empty()
            && self.material_pricing.is_empty()
            && self.suggested_contractors.is_empty()
    }
}
