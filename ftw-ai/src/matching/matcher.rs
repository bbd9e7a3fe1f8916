use serde_json::{json, Value};

use crate::config::{MatchWeights, VectorConfig};
use crate::embeddings::EmbeddingProvider;
use crate::error::Result;
use crate::models::{ContractorMatch, JobRequest, RetrievedDoc};
use crate::vector::VectorClient;

const CONTRACTOR_TOP_K: usize = 20;

/// Neutral signal defaults when a contractor record is missing a field.
const DEFAULT_RATING: f64 = 4.0;
const DEFAULT_COMPLETION: f64 = 0.9;
const DEFAULT_RESPONSE_HOURS: f64 = 24.0;
const DEFAULT_AVAILABILITY: f64 = 0.5;

/// Response speed decays linearly to zero at this many hours.
const RESPONSE_DECAY_HOURS: f64 = 24.0;

/// Specialty score when no specialty/trade overlap is found.
const SPECIALTY_MISS: f64 = 0.3;

/// Finds the best contractors for a job: embed, query the contractor index,
/// recompute each candidate's composite score, sort descending.
#[derive(Clone)]
pub struct ContractorMatcher {
    embeddings: EmbeddingProvider,
    vector: VectorConfig,
    weights: MatchWeights,
    matching_enabled: bool,
    rag_enabled: bool,
}

impl ContractorMatcher {
    pub fn new(
        embeddings: EmbeddingProvider,
        vector: &VectorConfig,
        weights: MatchWeights,
        matching_enabled: bool,
        rag_enabled: bool,
    ) -> Self {
        Self {
            embeddings,
            vector: vector.clone(),
            weights,
            matching_enabled,
            rag_enabled,
        }
    }

    pub async fn find_best(&self, job: &JobRequest) -> Result<Vec<ContractorMatch>> {
        if !self.matching_enabled || !self.rag_enabled {
            return Ok(Vec::new());
        }

        let client = match VectorClient::new(&self.vector) {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!(error = %e, "Contractor matching skipped");
                return Ok(Vec::new());
            }
        };

        let query_text = format!("{}. {}", job.title, job.description);
        let embedding = self.embeddings.embed(&query_text).await;
        if embedding.is_empty() {
            return Ok(Vec::new());
        }

        let mut filter = json!({"active": true});
        if let Some(ref zip) = job.zip {
            filter["zip"] = json!(zip);
        }

        let docs = match client
            .query(
                &self.vector.index_contractors,
                &embedding.vector,
                Some(filter),
                CONTRACTOR_TOP_K,
            )
            .await
        {
            Ok(docs) => docs,
            Err(e) => {
                tracing::warn!(error = %e, "Contractor query failed");
                return Ok(Vec::new());
            }
        };

        let mut matches: Vec<ContractorMatch> = docs
            .iter()
            .map(|doc| score_match(doc, &job.trades, &self.weights))
            .collect();

        matches.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.contractor_id.cmp(&b.contractor_id))
        });

        Ok(matches)
    }
}

/// Recompute a candidate's composite score from vector similarity plus the
/// profile signals carried in match metadata.
fn score_match(doc: &RetrievedDoc, job_trades: &[String], weights: &MatchWeights) -> ContractorMatch {
    let similarity = (doc.score as f64).clamp(0.0, 1.0);

    let review_score = metadata_f64(&doc.metadata, "rating")
        .unwrap_or(DEFAULT_RATING)
        .clamp(0.0, 5.0);
    let completion_rate = metadata_f64(&doc.metadata, "completion_rate")
        .unwrap_or(DEFAULT_COMPLETION)
        .clamp(0.0, 1.0);
    let response_time_hours = metadata_f64(&doc.metadata, "response_time_hours")
        .unwrap_or(DEFAULT_RESPONSE_HOURS)
        .max(0.0);
    let availability = metadata_f64(&doc.metadata, "availability")
        .unwrap_or(DEFAULT_AVAILABILITY)
        .clamp(0.0, 1.0);

    let specialties = metadata_strings(&doc.metadata, "specialties");
    let specialty_match = derive_specialty_match(&specialties, job_trades);

    let response_decay = (1.0 - response_time_hours / RESPONSE_DECAY_HOURS).max(0.0);

    let score = similarity * weights.similarity
        + (review_score / 5.0) * weights.reviews
        + completion_rate * weights.completion
        + response_decay * weights.response
        + specialty_match * weights.specialty
        + availability * weights.availability;

    ContractorMatch {
        contractor_id: doc.id.clone(),
        score,
        semantic_similarity: similarity,
        review_score,
        response_time_hours,
        completion_rate,
        specialty_match,
        availability,
        metadata: doc.metadata.clone(),
    }
}

/// Crude substring containment between contractor specialties and the job's
/// trades: any overlap in either direction is a full match, otherwise a
/// fixed partial credit. Not a semantic comparison.
pub fn derive_specialty_match(specialties: &[String], trades: &[String]) -> f64 {
    for specialty in specialties {
        let specialty = specialty.to_lowercase();
        for trade in trades {
            let trade = trade.to_lowercase();
            if specialty.contains(&trade) || trade.contains(&specialty) {
                return 1.0;
            }
        }
    }
    SPECIALTY_MISS
}

fn metadata_f64(metadata: &Value, key: &str) -> Option<f64> {
    metadata.get(key).and_then(|v| v.as_f64())
}

fn metadata_strings(metadata: &Value, key: &str) -> Vec<String> {
    metadata
        .get(key)
        .and_then(|v| v.as_array())
        .map(|values| {
            values
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
