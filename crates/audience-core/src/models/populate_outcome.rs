use serde::{Deserialize, Serialize};

/// Result of the one-time index population.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PopulateOutcome {
    /// Documents were written. `total` is the stored count afterwards.
    Added { added: usize, total: usize },
    /// The store already held at least as many documents as the corpus.
    AlreadyPopulated { total: usize },
    /// The index is unavailable; nothing was attempted.
    Skipped,
    /// Population was attempted and failed. Not retried.
    Failed { reason: String },
}

impl PopulateOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}
