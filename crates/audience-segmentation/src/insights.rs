//! Market-sizing figures for one segment tier.

use audience_core::config::{SegmentationConfig, TierParams};
use audience_core::{ScoredCustomer, SegmentInsight, SegmentTier};

/// Computes [`SegmentInsight`]s from segment members.
#[derive(Debug, Clone)]
pub struct InsightCalculator {
    config: SegmentationConfig,
}

impl InsightCalculator {
    pub fn new(config: &SegmentationConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    pub fn tier_params(&self, tier: SegmentTier) -> TierParams {
        match tier {
            SegmentTier::Primary => self.config.primary,
            SegmentTier::Secondary => self.config.secondary,
        }
    }

    /// Insight for `customers` in `tier`. An empty segment gets the fixed
    /// default insight with no income or conversion-rate figures.
    pub fn compute(&self, customers: &[ScoredCustomer], tier: SegmentTier) -> SegmentInsight {
        if customers.is_empty() {
            return self.empty();
        }

        let n = customers.len() as f64;
        let avg_age = customers.iter().map(|c| c.customer.age as f64).sum::<f64>() / n;
        let avg_income = customers.iter().map(|c| c.customer.income as f64).sum::<f64>() / n;

        let params = self.tier_params(tier);
        let estimated_reach = self.estimated_reach(params.base_reach, avg_income);
        let projected_conversions = round_count(estimated_reach as f64 * params.conversion_rate);

        SegmentInsight {
            estimated_reach,
            projected_conversions,
            avg_age,
            avg_income: Some(avg_income),
            conversion_rate: Some(params.conversion_rate),
            confidence: params.confidence,
        }
    }

    /// `max(0, round(base * (1 + (avg_income - baseline) / sensitivity)))`.
    pub fn estimated_reach(&self, base_reach: f64, avg_income: f64) -> u64 {
        let factor =
            1.0 + (avg_income - self.config.baseline_income) / self.config.income_sensitivity;
        round_count(base_reach * factor)
    }

    pub fn empty(&self) -> SegmentInsight {
        let defaults = self.config.empty;
        SegmentInsight {
            estimated_reach: defaults.estimated_reach,
            projected_conversions: defaults.projected_conversions,
            avg_age: defaults.avg_age,
            avg_income: None,
            conversion_rate: None,
            confidence: defaults.confidence,
        }
    }
}

impl Default for InsightCalculator {
    fn default() -> Self {
        Self::new(&SegmentationConfig::default())
    }
}

/// Round half away from zero, floored at zero. NaN counts as zero.
fn round_count(value: f64) -> u64 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    value.round() as u64
}
