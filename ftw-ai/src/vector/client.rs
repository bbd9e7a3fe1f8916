use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

use crate::config::VectorConfig;
use crate::error::{FtwError, Result};
use crate::models::RetrievedDoc;

/// Client for a hosted vector-search provider. One endpoint shape is
/// assumed (`POST {base}/indexes/{index}/query` with an `Api-Key` header),
/// but two response shapes are accepted: `matches[]` (Pinecone-style) and
/// `results[]`, with the similarity under either `score` or `similarity`.
#[derive(Clone)]
pub struct VectorClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl VectorClient {
    pub fn new(config: &VectorConfig) -> Result<Self> {
        let (Some(base_url), Some(api_key)) = (&config.base_url, &config.api_key) else {
            return Err(FtwError::VectorUnconfigured);
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FtwError::VectorSearch(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.clone(),
        })
    }

    /// Similarity query against one index. Returns matches sorted as the
    /// provider returned them.
    pub async fn query(
        &self,
        index: &str,
        vector: &[f32],
        filter: Option<Value>,
        top_k: usize,
    ) -> Result<Vec<RetrievedDoc>> {
        let mut body = json!({
            "vector": vector,
            "topK": top_k,
            "includeMetadata": true,
        });
        if let Some(filter) = filter {
            body["filter"] = filter;
        }

        let url = format!("{}/indexes/{}/query", self.base_url, index);

        let response = self
            .client
            .post(&url)
            .header("Api-Key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| FtwError::VectorSearch(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FtwError::VectorSearch(format!(
                "API error {status}: {body}"
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| FtwError::VectorSearch(format!("Failed to parse response: {e}")))?;

        Ok(parse_matches(&payload))
    }
}

fn parse_matches(payload: &Value) -> Vec<RetrievedDoc> {
    let rows = payload
        .get("matches")
        .or_else(|| payload.get("results"))
        .and_then(|v| v.as_array());

    let Some(rows) = rows else {
        return Vec::new();
    };

    rows.iter()
        .filter_map(|row| {
            let id = row
                .get("id")
                .or_else(|| row.get("_id"))
                .and_then(|v| v.as_str())?
                .to_string();
            let score = row
                .get("score")
                .or_else(|| row.get("similarity"))
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0) as f32;
            let metadata = row.get("metadata").cloned().unwrap_or(Value::Null);

            Some(RetrievedDoc {
                id,
                score,
                metadata,
            })
        })
        .collect()
}
