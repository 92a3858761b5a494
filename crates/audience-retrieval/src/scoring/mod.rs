//! Hybrid scoring: keyword affinity plus a semantic-distance transform.

pub mod keyword;
pub mod semantic;

use audience_core::config::RetrievalConfig;
use audience_core::CustomerRecord;

pub use keyword::{keyword_score, IntentCategory};
pub use semantic::{round_to, semantic_score};

/// Combines both signals for index hits.
#[derive(Debug, Clone, Copy)]
pub struct HybridScorer {
    semantic_scale: f64,
    decimals: u32,
}

impl HybridScorer {
    pub fn new(config: &RetrievalConfig) -> Self {
        Self {
            semantic_scale: config.semantic_scale,
            decimals: config.score_decimals,
        }
    }

    /// `semantic + keyword`, rounded.
    pub fn score_hit(
        &self,
        customer: &CustomerRecord,
        distance: f64,
        intent: Option<IntentCategory>,
    ) -> f64 {
        let total = semantic_score(distance, self.semantic_scale) + keyword_score(customer, intent);
        round_to(total, self.decimals)
    }
}

impl Default for HybridScorer {
    fn default() -> Self {
        Self::new(&RetrievalConfig::default())
    }
}
