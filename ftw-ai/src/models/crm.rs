use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Contact-pipeline signals for one lead, the input to lead scoring and
/// follow-up generation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    pub name: Option<String>,
    pub trade: String,
    pub job_value: Option<f64>,
    pub days_since_contact: i64,
    pub message_count: usize,
    /// Whether the most recent message came from the lead (vs. the
    /// contractor).
    pub last_message_from_lead: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Likelihood {
    Hot,
    Warm,
    Cold,
}

impl Likelihood {
    /// Membership-clamp a model label; anything unrecognized reads as the
    /// middle bucket.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "hot" => Self::Hot,
            "warm" => Self::Warm,
            "cold" => Self::Cold,
            _ => Self::Warm,
        }
    }

    pub fn for_score(score: u8) -> Self {
        match score {
            70..=u8::MAX => Self::Hot,
            40..=69 => Self::Warm,
            _ => Self::Cold,
        }
    }
}

/// How promising a lead currently looks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadScore {
    /// 0-100.
    pub score: u8,
    pub likelihood: Likelihood,
    pub reasoning: String,
    pub suggested_action: String,
    pub optimal_contact_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub from_lead: bool,
    pub text: String,
}

/// A lead/contractor message thread under analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Conversation {
    pub lead_id: String,
    pub messages: Vec<ConversationMessage>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
    Frustrated,
}

impl Sentiment {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "positive" => Self::Positive,
            "neutral" => Self::Neutral,
            "negative" => Self::Negative,
            "frustrated" => Self::Frustrated,
            _ => Self::Neutral,
        }
    }

    pub fn needs_attention(&self) -> bool {
        matches!(self, Self::Negative | Self::Frustrated)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentTrend {
    Improving,
    Stable,
    Declining,
}

impl SentimentTrend {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "improving" => Self::Improving,
            "stable" => Self::Stable,
            "declining" => Self::Declining,
            _ => Self::Stable,
        }
    }
}

/// Derived read on a conversation: overall tone, direction, and anything
/// worth flagging to the contractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationAnalysis {
    pub overall_sentiment: Sentiment,
    pub trend: SentimentTrend,
    pub warning_flags: Vec<String>,
    pub key_moments: Vec<String>,
    pub suggested_response: Option<String>,
}

impl Default for ConversationAnalysis {
    fn default() -> Self {
        Self {
            overall_sentiment: Sentiment::Neutral,
            trend: SentimentTrend::Stable,
            warning_flags: Vec::new(),
            key_moments: Vec::new(),
            suggested_response: None,
        }
    }
}

/// A drafted follow-up message with its locally computed delivery plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowUp {
    pub message: String,
    pub channel: String,
    pub send_at: DateTime<Utc>,
    pub tone: String,
}
