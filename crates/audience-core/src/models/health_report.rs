use serde::{Deserialize, Serialize};

use super::PopulateOutcome;
use crate::customer::CorpusSource;

/// Snapshot of engine health.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub index_available: bool,
    /// `None` when the index is unavailable or the count query failed.
    pub indexed_documents: Option<usize>,
    pub corpus_size: usize,
    pub corpus_source: CorpusSource,
    /// `None` until population has run.
    pub populate: Option<PopulateOutcome>,
    /// Distinct degradations not yet recovered; repeats count once.
    pub active_degradations: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Semantic search serving from a complete index.
    Healthy,
    /// Serving, but from a fallback (keyword-only search or default corpus).
    Degraded,
}
