use serde::{Deserialize, Serialize};

/// A segmentation request for one (product, campaign intent) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentRequest {
    pub product: String,
    pub query: String,
    /// Ranking depth. `None` uses `retrieval.default_top_k`.
    #[serde(default)]
    pub top_k: Option<usize>,
    /// Caller-supplied label echoed back in the response.
    #[serde(default = "default_segment_type")]
    pub segment_type: String,
}

fn default_segment_type() -> String {
    "primary".to_string()
}

impl SegmentRequest {
    pub fn new(product: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            product: product.into(),
            query: query.into(),
            top_k: None,
            segment_type: default_segment_type(),
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = Some(top_k);
        self
    }

    pub fn with_segment_type(mut self, segment_type: impl Into<String>) -> Self {
        self.segment_type = segment_type.into();
        self
    }

    /// Text sent to the similarity index: the intent followed by the product.
    pub fn search_text(&self) -> String {
        format!("{} {}", self.query, self.product)
    }
}
