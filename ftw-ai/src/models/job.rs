use serde::{Deserialize, Serialize};

/// What kind of work a posted job describes. Anything a model returns
/// outside this set collapses to [`JobIntent::Standard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobIntent {
    QuickFix,
    Standard,
    MajorProject,
    MultiTrade,
    Inspection,
    Emergency,
}

impl JobIntent {
    /// Normalize a free-form model label into the fixed intent set.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "quick_fix" => Self::QuickFix,
            "standard" => Self::Standard,
            "major_project" => Self::MajorProject,
            "multi_trade" => Self::MultiTrade,
            "inspection" => Self::Inspection,
            "emergency" => Self::Emergency,
            _ => Self::Standard,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::QuickFix => "quick_fix",
            Self::Standard => "standard",
            Self::MajorProject => "major_project",
            Self::MultiTrade => "multi_trade",
            Self::Inspection => "inspection",
            Self::Emergency => "emergency",
        }
    }
}

/// Classification of a job description, produced per request and cached by
/// the raw description text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobClassification {
    pub intent: JobIntent,
    /// Estimated complexity, clamped to 0-100.
    pub complexity: u8,
    pub trades: Vec<String>,
    /// Whether scope generation should go straight to the expensive tier.
    pub requires_sonnet: bool,
    /// Additive spam heuristic, 0.0-1.0.
    pub spam_score: f32,
    pub reasoning: String,
}

impl JobClassification {
    pub fn clamp_complexity(raw: i64) -> u8 {
        raw.clamp(0, 100) as u8
    }
}

impl Default for JobClassification {
    fn default() -> Self {
        Self {
            intent: JobIntent::Standard,
            complexity: 50,
            trades: Vec::new(),
            requires_sonnet: false,
            spam_score: 0.0,
            reasoning: String::new(),
        }
    }
}

/// Job attributes as posted, the input to scope generation and matching.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobRequest {
    pub title: String,
    pub description: String,
    pub trades: Vec<String>,
    pub multi_trade: bool,
    pub is_major_project: bool,
    pub photo_count: usize,
    pub zip: Option<String>,
}
