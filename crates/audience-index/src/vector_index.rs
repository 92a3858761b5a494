//! `VectorIndex`: SQLite-backed document store plus embedding engine.

use std::sync::{Mutex, MutexGuard, OnceLock};

use audience_core::config::AudienceConfig;
use audience_core::errors::{AudienceResult, IndexError};
use audience_core::models::{DegradationEvent, IndexHit, IndexedDocument, PopulateOutcome};
use audience_core::traits::ISimilarityIndex;
use audience_core::CustomerRecord;
use audience_embeddings::EmbeddingEngine;
use audience_storage::StorageEngine;
use tracing::{debug, info, warn};

const COMPONENT: &str = "similarity_index";

pub struct VectorIndex {
    /// `None` when the store could not be opened. Never changes afterwards.
    store: Option<StorageEngine>,
    embeddings: Mutex<EmbeddingEngine>,
    populated: OnceLock<PopulateOutcome>,
    open_failure: Option<String>,
    events: Mutex<Vec<DegradationEvent>>,
}

impl VectorIndex {
    /// Open the index described by `config`. Never fails: a store that cannot
    /// be opened or migrated yields a permanently unavailable index.
    pub fn open(config: &AudienceConfig) -> Self {
        let embeddings = EmbeddingEngine::new(&config.embedding);
        let opened = StorageEngine::from_config(&config.storage).and_then(|store| {
            check_dimensions(&store, config.embedding.dimensions)?;
            Ok(store)
        });
        match opened {
            Ok(store) => Self::with_parts(Some(store), embeddings, None),
            Err(e) => {
                let reason = e.to_string();
                warn!(
                    db_path = %config.storage.db_path,
                    error = %reason,
                    "similarity index unavailable, keyword-only search will be used"
                );
                Self::with_parts(None, embeddings, Some(reason))
            }
        }
    }

    /// An index that is unavailable from the start.
    pub fn unavailable(config: &AudienceConfig, reason: impl Into<String>) -> Self {
        Self::with_parts(
            None,
            EmbeddingEngine::new(&config.embedding),
            Some(reason.into()),
        )
    }

    fn with_parts(
        store: Option<StorageEngine>,
        embeddings: EmbeddingEngine,
        open_failure: Option<String>,
    ) -> Self {
        let events = open_failure
            .iter()
            .map(|reason| DegradationEvent::now(COMPONENT, reason.clone(), "keyword_only"))
            .collect();
        Self {
            store,
            embeddings: Mutex::new(embeddings),
            populated: OnceLock::new(),
            open_failure,
            events: Mutex::new(events),
        }
    }

    pub fn available(&self) -> bool {
        self.store.is_some()
    }

    /// Why the store failed to open, if it did.
    pub fn open_failure(&self) -> Option<&str> {
        self.open_failure.as_deref()
    }

    fn store(&self) -> AudienceResult<&StorageEngine> {
        self.store.as_ref().ok_or_else(|| {
            IndexError::Unavailable {
                reason: self
                    .open_failure
                    .clone()
                    .unwrap_or_else(|| "store not opened".to_string()),
            }
            .into()
        })
    }

    fn embeddings(&self) -> AudienceResult<MutexGuard<'_, EmbeddingEngine>> {
        self.embeddings.lock().map_err(|e| {
            IndexError::QueryFailed {
                reason: format!("embedding engine lock poisoned: {e}"),
            }
            .into()
        })
    }

    pub fn count(&self) -> AudienceResult<usize> {
        self.store()?.count_documents()
    }

    /// Populate from `corpus` once. Later calls, including concurrent ones,
    /// return the first outcome without touching the store.
    pub fn populate(&self, corpus: &[CustomerRecord]) -> PopulateOutcome {
        self.populated
            .get_or_init(|| self.populate_once(corpus))
            .clone()
    }

    /// Outcome of population, if it has run.
    pub fn populate_outcome(&self) -> Option<&PopulateOutcome> {
        self.populated.get()
    }

    fn populate_once(&self, corpus: &[CustomerRecord]) -> PopulateOutcome {
        let Some(store) = self.store.as_ref() else {
            debug!("index unavailable, skipping population");
            return PopulateOutcome::Skipped;
        };

        let outcome = match self.add_missing(store, corpus) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "index population failed");
                self.record(DegradationEvent::now(
                    COMPONENT,
                    format!("population failed: {e}"),
                    "partial_index",
                ));
                PopulateOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };
        info!(outcome = ?outcome, corpus_size = corpus.len(), "index population finished");
        outcome
    }

    fn add_missing(
        &self,
        store: &StorageEngine,
        corpus: &[CustomerRecord],
    ) -> AudienceResult<PopulateOutcome> {
        let stored = store.count_documents()?;
        if stored >= corpus.len() {
            return Ok(PopulateOutcome::AlreadyPopulated { total: stored });
        }

        let docs: Vec<IndexedDocument> = corpus.iter().map(IndexedDocument::from_customer).collect();
        let (vectors, model) = {
            let mut embeddings = self.embeddings()?;
            let vectors = embeddings.embed_documents(&docs)?;
            (vectors, embeddings.active_provider().to_string())
        };
        let rows: Vec<(IndexedDocument, Vec<f32>)> = docs.into_iter().zip(vectors).collect();
        let added = store.insert_documents(&rows, &model)?;
        let total = store.count_documents()?;
        Ok(PopulateOutcome::Added { added, total })
    }

    /// Up to `k` nearest documents to `text`, `k` clamped to the stored count.
    pub fn query(&self, text: &str, k: usize) -> AudienceResult<Vec<IndexHit>> {
        let store = self.store()?;
        let k = k.min(store.count_documents()?);
        if k == 0 {
            return Ok(Vec::new());
        }
        let embedding = self.embeddings()?.embed_query(text)?;
        let hits = store.search_nearest(&embedding, k)?;
        for hit in &hits {
            debug!(doc_id = %hit.doc_id, distance = hit.distance, "index hit");
        }
        Ok(hits)
    }

    fn record(&self, event: DegradationEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }

    /// Take every degradation recorded by the index and its embedding engine.
    pub fn drain_degradations(&self) -> Vec<DegradationEvent> {
        let mut drained = self
            .events
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default();
        if let Ok(mut embeddings) = self.embeddings.lock() {
            drained.extend(embeddings.drain_degradation_events());
        }
        drained
    }

    /// Release the store's connections.
    pub fn close(self) {
        if self.store.is_some() {
            info!("similarity index closed");
        }
    }
}

/// Stored embeddings must match the configured width, or every query
/// against them would fail.
fn check_dimensions(store: &StorageEngine, expected: usize) -> AudienceResult<()> {
    let stored = store.stored_dimensions()?;
    if let Some(&actual) = stored.iter().find(|&&d| d != expected) {
        return Err(IndexError::Unavailable {
            reason: format!(
                "stored embeddings have {actual} dimensions, configured {expected}"
            ),
        }
        .into());
    }
    Ok(())
}

impl ISimilarityIndex for VectorIndex {
    fn available(&self) -> bool {
        VectorIndex::available(self)
    }

    fn count(&self) -> AudienceResult<usize> {
        VectorIndex::count(self)
    }

    fn populate(&self, corpus: &[CustomerRecord]) -> PopulateOutcome {
        VectorIndex::populate(self, corpus)
    }

    fn query(&self, text: &str, k: usize) -> AudienceResult<Vec<IndexHit>> {
        VectorIndex::query(self, text, k)
    }

    fn drain_degradations(&self) -> Vec<DegradationEvent> {
        VectorIndex::drain_degradations(self)
    }
}
