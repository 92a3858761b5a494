//! Property tests: tier sizes, non-negative reach, determinism.

use proptest::prelude::*;

use audience_core::models::SearchPath;
use audience_core::ScoredCustomer;
use audience_segmentation::SegmentationEngine;
use test_fixtures::customer;

fn arb_ranked() -> impl Strategy<Value = Vec<ScoredCustomer>> {
    prop::collection::vec((16i64..90, -50_000i64..500_000, 0.0f64..40.0), 0..12).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (age, income, score))| {
                ScoredCustomer::new(customer(&format!("p{i}"), age, income, ""), score)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_tier_sizes(ranked in arb_ranked()) {
        let engine = SegmentationEngine::default();
        let response = engine.segment(&ranked, "primary", SearchPath::Semantic);
        let n = if ranked.is_empty() { 3 } else { ranked.len() };
        prop_assert_eq!(response.segments.primary.len(), n.min(3));
        prop_assert_eq!(response.segments.secondary.len(), n.saturating_sub(3).min(3));
    }

    #[test]
    fn prop_insights_are_sane(ranked in arb_ranked()) {
        let engine = SegmentationEngine::default();
        let response = engine.segment(&ranked, "primary", SearchPath::Semantic);
        for insight in [&response.insights.primary, &response.insights.secondary] {
            prop_assert!(insight.projected_conversions <= insight.estimated_reach);
            prop_assert!(insight.avg_age.is_finite());
        }
    }

    #[test]
    fn prop_deterministic(ranked in arb_ranked()) {
        let engine = SegmentationEngine::default();
        let a = engine.segment(&ranked, "primary", SearchPath::Semantic);
        let b = engine.segment(&ranked, "primary", SearchPath::Semantic);
        prop_assert_eq!(a, b);
    }
}
