//! Market segments and the response returned for a segmentation request.

use serde::{Deserialize, Serialize};

use crate::customer::ScoredCustomer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentTier {
    Primary,
    Secondary,
}

impl SegmentTier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }
}

/// Derived market-sizing figures for one segment.
///
/// `avg_income` and `conversion_rate` are absent in the empty-segment default
/// and omitted from serialized output when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentInsight {
    pub estimated_reach: u64,
    pub projected_conversions: u64,
    pub avg_age: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_income: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion_rate: Option<f64>,
    pub confidence: f64,
}

/// A tier's customers with the insight computed from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub tier: SegmentTier,
    pub customers: Vec<ScoredCustomer>,
    pub insight: SegmentInsight,
}

/// A value per segment tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentPair<T> {
    pub primary: T,
    pub secondary: T,
}

/// Why a request was served by keyword-only ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// The index could not be constructed; permanent for the engine lifetime.
    IndexUnavailable,
    /// A query against an available index failed; this call only.
    QueryFailed,
    /// The index is available but holds no documents.
    EmptyIndex,
}

/// Which ranking path produced the customers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "path", rename_all = "snake_case")]
pub enum SearchPath {
    Semantic,
    Fallback { reason: FallbackReason },
}

/// Result of a segmentation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentationResponse {
    pub insights: SegmentPair<SegmentInsight>,
    pub segments: SegmentPair<Vec<ScoredCustomer>>,
    pub segment_type: String,
    pub search_path: SearchPath,
    /// True when no customer ranked and the default archetypes were segmented.
    pub used_default_customers: bool,
}

impl SegmentationResponse {
    pub fn from_segments(
        primary: Segment,
        secondary: Segment,
        segment_type: impl Into<String>,
        search_path: SearchPath,
        used_default_customers: bool,
    ) -> Self {
        Self {
            insights: SegmentPair {
                primary: primary.insight,
                secondary: secondary.insight,
            },
            segments: SegmentPair {
                primary: primary.customers,
                secondary: secondary.customers,
            },
            segment_type: segment_type.into(),
            search_path,
            used_default_customers,
        }
    }
}
