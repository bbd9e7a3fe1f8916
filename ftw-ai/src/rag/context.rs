use serde_json::json;

use crate::config::VectorConfig;
use crate::embeddings::EmbeddingProvider;
use crate::error::Result;
use crate::models::{RagContext, RetrievedDoc};
use crate::vector::VectorClient;

const SCOPES_TOP_K: usize = 5;
const MATERIALS_TOP_K: usize = 10;
const CONTRACTORS_TOP_K: usize = 8;

/// Assembles retrieval context for a job: similar completed scopes, material
/// pricing, and available contractors, plus simple derived statistics.
#[derive(Clone)]
pub struct RagContextBuilder {
    embeddings: EmbeddingProvider,
    vector: VectorConfig,
    enabled: bool,
}

impl RagContextBuilder {
    pub fn new(embeddings: EmbeddingProvider, vector: &VectorConfig, enabled: bool) -> Self {
        Self {
            embeddings,
            vector: vector.clone(),
            enabled,
        }
    }

    /// Build context for a job description. Disabled RAG or an empty
    /// embedding short-circuits to the empty context without touching the
    /// vector provider; individual query failures degrade to empty lists.
    pub async fn job_context(&self, description: &str) -> RagContext {
        if !self.enabled {
            return RagContext::empty();
        }

        let embedding = self.embeddings.embed(description).await;
        if embedding.is_empty() {
            return RagContext::empty();
        }

        let client = match VectorClient::new(&self.vector) {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!(error = %e, "Vector provider unavailable, returning empty context");
                return RagContext::empty();
            }
        };

        let (similar_scopes, material_pricing, suggested_contractors) = futures::join!(
            self.fetch(
                &client,
                &self.vector.index_scopes,
                &embedding.vector,
                Some(json!({"status": "completed"})),
                SCOPES_TOP_K,
            ),
            self.fetch(
                &client,
                &self.vector.index_materials,
                &embedding.vector,
                None,
                MATERIALS_TOP_K,
            ),
            self.fetch(
                &client,
                &self.vector.index_contractors,
                &embedding.vector,
                None,
                CONTRACTORS_TOP_K,
            ),
        );

        let average_price = average_price(&similar_scopes);
        let typical_timeframe = typical_timeframe(&similar_scopes);

        RagContext {
            similar_scopes,
            material_pricing,
            suggested_contractors,
            average_price,
            typical_timeframe,
        }
    }

    /// One index query that swallows its own failure.
    async fn fetch(
        &self,
        client: &VectorClient,
        index: &str,
        vector: &[f32],
        filter: Option<serde_json::Value>,
        top_k: usize,
    ) -> Vec<RetrievedDoc> {
        let result: Result<Vec<RetrievedDoc>> = client.query(index, vector, filter, top_k).await;
        match result {
            Ok(docs) => docs,
            Err(e) => {
                tracing::warn!(index = index, error = %e, "Vector query failed");
                Vec::new()
            }
        }
    }
}

/// Rounded arithmetic mean of the numeric `price` metadata fields, if any.
fn average_price(docs: &[RetrievedDoc]) -> Option<u32> {
    let prices: Vec<f64> = docs
        .iter()
        .filter_map(|doc| doc.metadata.get("price").and_then(|v| v.as_f64()))
        .collect();

    if prices.is_empty() {
        return None;
    }

    let mean = prices.iter().sum::<f64>() / prices.len() as f64;
    Some(mean.round() as u32)
}

/// Bucketed label for the mean `duration_days` metadata field.
fn typical_timeframe(docs: &[RetrievedDoc]) -> Option<String> {
    let durations: Vec<f64> = docs
        .iter()
        .filter_map(|doc| doc.metadata.get("duration_days").and_then(|v| v.as_f64()))
        .collect();

    if durations.is_empty() {
        return None;
    }

    let mean = durations.iter().sum::<f64>() / durations.len() as f64;
    let label = if mean < 1.0 {
        "less than a day".to_string()
    } else if mean <= 3.0 {
        "1-3 days".to_string()
    } else if mean <= 7.0 {
        "3-7 days".to_string()
    } else {
        format!("{} days", mean.round() as u32)
    };

    Some(label)
}
