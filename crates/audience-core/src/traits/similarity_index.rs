use crate::customer::CustomerRecord;
use crate::errors::AudienceResult;
use crate::models::{DegradationEvent, IndexHit, PopulateOutcome};

/// Persistent similarity index over customer documents.
///
/// `available()` is fixed at construction: an index that failed to open stays
/// unavailable. A failing `query` on an available index leaves it available.
pub trait ISimilarityIndex: Send + Sync {
    fn available(&self) -> bool;

    /// Number of stored documents.
    fn count(&self) -> AudienceResult<usize>;

    /// Add documents for `corpus` when fewer than `corpus.len()` are stored.
    /// Runs at most once per index; later calls return the first outcome.
    fn populate(&self, corpus: &[CustomerRecord]) -> PopulateOutcome;

    /// Up to `k` hits by ascending distance, `k` clamped to `count()`.
    fn query(&self, text: &str, k: usize) -> AudienceResult<Vec<IndexHit>>;

    /// Take degradation events recorded since the last call.
    fn drain_degradations(&self) -> Vec<DegradationEvent> {
        Vec::new()
    }
}
