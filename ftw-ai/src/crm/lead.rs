use serde_json::Value;

use crate::error::Result;
use crate::llm::{prompts, ChatProvider};
use crate::models::{Lead, LeadScore, Likelihood};
use crate::outcome::Derived;

/// Scores leads via the shared background chat provider, degrading to a
/// recency/value heuristic.
#[derive(Clone)]
pub struct LeadScorer {
    provider: ChatProvider,
    enabled: bool,
}

impl LeadScorer {
    pub fn new(provider: ChatProvider, enabled: bool) -> Self {
        Self { provider, enabled }
    }

    pub async fn score_lead(&self, lead: &Lead) -> Result<Derived<LeadScore>> {
        if !self.enabled {
            return Ok(Derived::fallback(heuristic_score(lead), "background disabled"));
        }

        if !self.provider.is_available() {
            return Ok(Derived::fallback(
                heuristic_score(lead),
                "background provider unavailable",
            ));
        }

        let prompt = prompts::lead_scoring_prompt(lead);
        match self.provider.complete_json(&prompt, None).await {
            Ok(parsed) => Ok(Derived::Model(parse_lead_score(&parsed))),
            Err(e) => {
                tracing::warn!(lead_id = %lead.id, error = %e, "Lead scoring failed, using heuristic");
                Ok(Derived::fallback(
                    heuristic_score(lead),
                    format!("lead scoring call failed: {e}"),
                ))
            }
        }
    }
}

fn parse_lead_score(parsed: &Value) -> LeadScore {
    let score = parsed
        .get("score")
        .and_then(|v| v.as_i64())
        .map(|v| v.clamp(0, 100) as u8)
        .unwrap_or(50);

    let likelihood = parsed
        .get("likelihood")
        .and_then(|v| v.as_str())
        .map(Likelihood::from_label)
        .unwrap_or_else(|| Likelihood::for_score(score));

    LeadScore {
        score,
        likelihood,
        reasoning: text_or(parsed, "reasoning", ""),
        suggested_action: text_or(parsed, "suggested_action", "Send a short follow-up"),
        optimal_contact_time: text_or(parsed, "optimal_contact_time", "weekday mornings"),
    }
}

fn text_or(parsed: &Value, key: &str, default: &str) -> String {
    parsed
        .get(key)
        .and_then(|v| v.as_str())
        .unwrap_or(default)
        .to_string()
}

/// Deterministic fallback: recency and job value move a base score of 50.
fn heuristic_score(lead: &Lead) -> LeadScore {
    let mut score: i64 = 50;

    if lead.days_since_contact <= 2 {
        score += 20;
    } else if lead.days_since_contact > 14 {
        score -= 20;
    }

    if lead.job_value.unwrap_or(0.0) >= 5000.0 {
        score += 10;
    }

    let score = score.clamp(0, 100) as u8;

    LeadScore {
        score,
        likelihood: Likelihood::for_score(score),
        reasoning: "Heuristic from contact recency and job value".to_string(),
        suggested_action: "Send a short follow-up".to_string(),
        optimal_contact_time: "weekday mornings".to_string(),
    }
}
