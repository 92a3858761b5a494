use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants;

/// Per-tier market sizing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierParams {
    pub base_reach: f64,
    pub conversion_rate: f64,
    pub confidence: f64,
}

impl TierParams {
    pub fn primary() -> Self {
        Self {
            base_reach: defaults::DEFAULT_PRIMARY_BASE_REACH,
            conversion_rate: defaults::DEFAULT_PRIMARY_CONVERSION_RATE,
            confidence: defaults::DEFAULT_PRIMARY_CONFIDENCE,
        }
    }

    pub fn secondary() -> Self {
        Self {
            base_reach: defaults::DEFAULT_SECONDARY_BASE_REACH,
            conversion_rate: defaults::DEFAULT_SECONDARY_CONVERSION_RATE,
            confidence: defaults::DEFAULT_SECONDARY_CONFIDENCE,
        }
    }
}

/// Insight reported for a segment with no customers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmptySegmentDefaults {
    pub estimated_reach: u64,
    pub projected_conversions: u64,
    pub avg_age: f64,
    pub confidence: f64,
}

impl Default for EmptySegmentDefaults {
    fn default() -> Self {
        Self {
            estimated_reach: defaults::DEFAULT_EMPTY_REACH,
            projected_conversions: defaults::DEFAULT_EMPTY_CONVERSIONS,
            avg_age: defaults::DEFAULT_EMPTY_AVG_AGE,
            confidence: defaults::DEFAULT_EMPTY_CONFIDENCE,
        }
    }
}

/// Segmentation and market sizing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationConfig {
    /// Customers per tier.
    pub segment_size: usize,
    /// Income at which reach equals the tier's base reach.
    pub baseline_income: f64,
    /// Income delta that scales reach by 100%.
    pub income_sensitivity: f64,
    pub primary: TierParams,
    pub secondary: TierParams,
    pub empty: EmptySegmentDefaults,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            segment_size: constants::SEGMENT_SIZE,
            baseline_income: defaults::DEFAULT_BASELINE_INCOME,
            income_sensitivity: defaults::DEFAULT_INCOME_SENSITIVITY,
            primary: TierParams::primary(),
            secondary: TierParams::secondary(),
            empty: EmptySegmentDefaults::default(),
        }
    }
}
