mod followup;
mod lead;
mod sentiment;

pub use followup::{determine_channel, optimal_send_time, FollowUpGenerator};
pub use lead::LeadScorer;
pub use sentiment::SentimentAnalyzer;
