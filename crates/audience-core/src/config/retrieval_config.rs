use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants;

/// Retrieval and scoring configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// `top_k` used when a request does not carry one.
    pub default_top_k: usize,
    /// Multiplier applied to `max(0, 1 - distance)`.
    pub semantic_scale: f64,
    /// Decimal places kept on hybrid scores.
    pub score_decimals: u32,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_top_k: defaults::DEFAULT_TOP_K,
            semantic_scale: defaults::DEFAULT_SEMANTIC_SCALE,
            score_decimals: constants::SCORE_DECIMALS,
        }
    }
}
