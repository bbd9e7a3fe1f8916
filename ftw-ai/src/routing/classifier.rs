use std::time::Duration;

use serde_json::Value;

use crate::cache::TtlCache;
use crate::config::CacheConfig;
use crate::error::Result;
use crate::llm::{prompts, ChatProvider};
use crate::models::{JobClassification, JobIntent};
use crate::outcome::Derived;
use crate::routing::spam::spam_score;

const EMERGENCY_KEYWORDS: &[&str] = &[
    "emergency", "urgent", "leak", "flood", "no heat", "no power", "burst", "gas",
];

const MULTI_TRADE_KEYWORDS: &[&str] = &[
    "remodel", "renovation", "addition", "kitchen", "bathroom", "basement",
];

/// Below this length a description with no other signals reads as a quick
/// fix.
const QUICK_FIX_MAX_LEN: usize = 180;

/// Classifies job descriptions via the routing chat provider, with a
/// deterministic keyword fallback. Model results are cached by the raw
/// description text.
#[derive(Clone)]
pub struct JobClassifier {
    provider: ChatProvider,
    enabled: bool,
    cache: TtlCache<JobClassification>,
}

impl JobClassifier {
    pub fn new(provider: ChatProvider, enabled: bool, cache: &CacheConfig) -> Self {
        Self {
            provider,
            enabled,
            cache: TtlCache::new(cache.max_entries, Duration::from_secs(cache.ttl_secs)),
        }
    }

    pub async fn classify(&self, description: &str) -> Result<Derived<JobClassification>> {
        if !self.enabled {
            return Ok(Derived::fallback(
                rule_based_classification(description),
                "routing disabled",
            ));
        }

        if let Some(cached) = self.cache.get(description) {
            tracing::debug!("Classification cache hit");
            return Ok(Derived::Model(cached));
        }

        if !self.provider.is_available() {
            return Ok(Derived::fallback(
                rule_based_classification(description),
                "routing provider unavailable",
            ));
        }

        let prompt = prompts::classification_prompt(description);
        match self.provider.complete_json(&prompt, None).await {
            Ok(parsed) => {
                let classification = parse_classification(&parsed, description);
                self.cache
                    .insert(description.to_string(), classification.clone());
                Ok(Derived::Model(classification))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Classification failed, using rule-based fallback");
                Ok(Derived::fallback(
                    rule_based_classification(description),
                    format!("classification call failed: {e}"),
                ))
            }
        }
    }
}

/// Field-wise parse with normalization: unknown intents collapse to
/// `standard`, complexity clamps to 0-100, the spam score falls back to the
/// local heuristic when the model omits it.
fn parse_classification(parsed: &Value, description: &str) -> JobClassification {
    let intent = parsed
        .get("intent")
        .and_then(|v| v.as_str())
        .map(JobIntent::from_label)
        .unwrap_or(JobIntent::Standard);

    let complexity = parsed
        .get("complexity")
        .and_then(|v| v.as_i64())
        .map(JobClassification::clamp_complexity)
        .unwrap_or(50);

    let trades = parsed
        .get("trades")
        .and_then(|v| v.as_array())
        .map(|values| {
            values
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();

    let requires_sonnet = parsed
        .get("requires_sonnet")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);

    let spam = parsed
        .get("spam_score")
        .and_then(|v| v.as_f64())
        .map(|v| v.clamp(0.0, 1.0) as f32)
        .unwrap_or_else(|| spam_score(description));

    let reasoning = parsed
        .get("reasoning")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();

    JobClassification {
        intent,
        complexity,
        trades,
        requires_sonnet,
        spam_score: spam,
        reasoning,
    }
}

/// Deterministic keyword classification, checked in priority order:
/// emergency, multi-trade, short-description quick fix, generic standard.
pub fn rule_based_classification(description: &str) -> JobClassification {
    let lowered = description.to_lowercase();

    if EMERGENCY_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        return JobClassification {
            intent: JobIntent::Emergency,
            complexity: 80,
            trades: Vec::new(),
            requires_sonnet: true,
            spam_score: spam_score(description),
            reasoning: "Matched emergency keywords".to_string(),
        };
    }

    if MULTI_TRADE_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        return JobClassification {
            intent: JobIntent::MultiTrade,
            complexity: 70,
            trades: Vec::new(),
            requires_sonnet: true,
            spam_score: spam_score(description),
            reasoning: "Matched multi-trade keywords".to_string(),
        };
    }

    if description.len() < QUICK_FIX_MAX_LEN {
        return JobClassification {
            intent: JobIntent::QuickFix,
            complexity: 20,
            trades: Vec::new(),
            requires_sonnet: false,
            spam_score: spam_score(description),
            reasoning: "Short description".to_string(),
        };
    }

    JobClassification {
        intent: JobIntent::Standard,
        complexity: 50,
        trades: Vec::new(),
        requires_sonnet: false,
        spam_score: spam_score(description),
        reasoning: "No strong signals".to_string(),
    }
}
