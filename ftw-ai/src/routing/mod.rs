mod classifier;
mod spam;

pub use classifier::{rule_based_classification, JobClassifier};
pub use spam::spam_score;
