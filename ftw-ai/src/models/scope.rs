use serde::{Deserialize, Serialize};

/// A generated scope of work with a price range and timeline. `model`
/// records which hosted model actually produced the text, which is also how
/// callers can tell the cheap and expensive tiers apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeResult {
    pub scope: String,
    pub price_low: u32,
    pub price_high: u32,
    pub materials: Vec<String>,
    pub time: String,
    pub model: String,
}

impl ScopeResult {
    /// Restore `price_low <= price_high` when a malformed model response
    /// produced an inverted range.
    pub fn normalize_prices(mut self) -> Self {
        if self.price_low > self.price_high {
            std::mem::swap(&mut self.price_low, &mut self.price_high);
        }
        self
    }
}
