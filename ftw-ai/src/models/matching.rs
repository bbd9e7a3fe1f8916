use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A contractor candidate for a job with the composite score and the
/// individual signals it was blended from. Recomputed per query, never
/// stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractorMatch {
    pub contractor_id: String,
    /// Weighted linear blend of the signals below, in [0, 1] for inputs
    /// normalized to their documented maxima.
    pub score: f64,
    pub semantic_similarity: f64,
    /// Average review rating on the 0-5 scale.
    pub review_score: f64,
    pub response_time_hours: f64,
    /// Fraction of accepted jobs completed, 0-1.
    pub completion_rate: f64,
    /// 1.0 on a specialty/trade substring match, 0.3 otherwise.
    pub specialty_match: f64,
    /// 0-1 availability signal.
    pub availability: f64,
    #[serde(default)]
    pub metadata: Value,
}
