use serde_json::Value;

use crate::error::Result;
use crate::llm::{prompts, ChatProvider};
use crate::models::{Conversation, ConversationAnalysis, Sentiment, SentimentTrend};
use crate::outcome::Derived;

/// Reads lead/contractor conversations for tone and direction via the
/// background chat provider, degrading to a neutral/stable default.
#[derive(Clone)]
pub struct SentimentAnalyzer {
    provider: ChatProvider,
    enabled: bool,
}

impl SentimentAnalyzer {
    pub fn new(provider: ChatProvider, enabled: bool) -> Self {
        Self { provider, enabled }
    }

    pub async fn analyze(
        &self,
        conversation: &Conversation,
    ) -> Result<Derived<ConversationAnalysis>> {
        if !self.enabled {
            return Ok(Derived::fallback(
                ConversationAnalysis::default(),
                "background disabled",
            ));
        }

        if !self.provider.is_available() {
            return Ok(Derived::fallback(
                ConversationAnalysis::default(),
                "background provider unavailable",
            ));
        }

        let prompt = prompts::sentiment_prompt(conversation);
        match self.provider.complete_json(&prompt, None).await {
            Ok(parsed) => Ok(Derived::Model(parse_analysis(&parsed))),
            Err(e) => {
                tracing::warn!(lead_id = %conversation.lead_id, error = %e, "Sentiment analysis failed, using neutral default");
                Ok(Derived::fallback(
                    ConversationAnalysis::default(),
                    format!("sentiment call failed: {e}"),
                ))
            }
        }
    }
}

fn parse_analysis(parsed: &Value) -> ConversationAnalysis {
    let overall_sentiment = parsed
        .get("overall_sentiment")
        .and_then(|v| v.as_str())
        .map(Sentiment::from_label)
        .unwrap_or(Sentiment::Neutral);

    let trend = parsed
        .get("trend")
        .and_then(|v| v.as_str())
        .map(SentimentTrend::from_label)
        .unwrap_or(SentimentTrend::Stable);

    // A drafted response is only worth surfacing when the conversation
    // actually needs rescuing.
    let suggested_response = if overall_sentiment.needs_attention() {
        parsed
            .get("suggested_response")
            .and_then(|v| v.as_str())
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
    } else {
        None
    };

    ConversationAnalysis {
        overall_sentiment,
        trend,
        warning_flags: string_list(parsed, "warning_flags"),
        key_moments: string_list(parsed, "key_moments"),
        suggested_response,
    }
}

fn string_list(parsed: &Value, key: &str) -> Vec<String> {
    parsed
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
