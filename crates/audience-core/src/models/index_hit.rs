use serde::{Deserialize, Serialize};

use super::Metadata;

/// One similarity-index match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexHit {
    pub doc_id: String,
    pub customer_id: String,
    pub document: String,
    pub metadata: Metadata,
    /// Cosine distance in `[0, 2]`; lower is closer.
    pub distance: f64,
}
