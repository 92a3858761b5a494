//! SegmentationEngine: tier slicing over a ranked customer list.

use tracing::{debug, warn};

use audience_core::config::SegmentationConfig;
use audience_core::customer::default_customers;
use audience_core::models::{SearchPath, Segment};
use audience_core::{ScoredCustomer, SegmentTier, SegmentationResponse};

use crate::insights::InsightCalculator;

pub struct SegmentationEngine {
    calculator: InsightCalculator,
    segment_size: usize,
}

impl SegmentationEngine {
    pub fn new(config: &SegmentationConfig) -> Self {
        Self {
            calculator: InsightCalculator::new(config),
            segment_size: config.segment_size,
        }
    }

    pub fn calculator(&self) -> &InsightCalculator {
        &self.calculator
    }

    /// Split `ranked` into tiers and compute their insights.
    ///
    /// Primary takes `[0, size)`, secondary `[size, 2 * size)`; anything past
    /// that is dropped. An empty list is replaced by the default customers at
    /// score zero.
    pub fn segment(
        &self,
        ranked: &[ScoredCustomer],
        segment_type: &str,
        search_path: SearchPath,
    ) -> SegmentationResponse {
        let substituted;
        let (customers, used_defaults) = if ranked.is_empty() {
            warn!("no customers ranked, segmenting default customers");
            substituted = default_customers()
                .into_iter()
                .map(|c| ScoredCustomer::new(c, 0.0))
                .collect::<Vec<_>>();
            (substituted.as_slice(), true)
        } else {
            (ranked, false)
        };

        let size = self.segment_size;
        let primary_end = customers.len().min(size);
        let secondary_end = customers.len().min(size.saturating_mul(2));

        let primary = self.build(&customers[..primary_end], SegmentTier::Primary);
        let secondary = self.build(&customers[primary_end..secondary_end], SegmentTier::Secondary);
        debug!(
            primary = primary.customers.len(),
            secondary = secondary.customers.len(),
            segment_type,
            "segments built"
        );

        SegmentationResponse::from_segments(
            primary,
            secondary,
            segment_type,
            search_path,
            used_defaults,
        )
    }

    fn build(&self, customers: &[ScoredCustomer], tier: SegmentTier) -> Segment {
        Segment {
            tier,
            customers: customers.to_vec(),
            insight: self.calculator.compute(customers, tier),
        }
    }
}

impl Default for SegmentationEngine {
    fn default() -> Self {
        Self::new(&SegmentationConfig::default())
    }
}
