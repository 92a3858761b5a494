//! AudienceEngine: owns the corpus, the index, and the request pipeline.

use std::path::Path;
use std::sync::{Arc, Mutex, OnceLock};

use tracing::{debug, info, warn};

use audience_core::config::AudienceConfig;
use audience_core::errors::AudienceResult;
use audience_core::models::{
    DegradationEvent, FallbackReason, HealthReport, HealthStatus, SearchPath,
};
use audience_core::traits::ISimilarityIndex;
use audience_core::{
    BudgetSnapshot, Corpus, CorpusSource, PopulateOutcome, Product, ProductCatalog,
    SegmentRequest, SegmentationResponse,
};
use audience_index::VectorIndex;
use audience_retrieval::fallback::keyword_only;
use audience_retrieval::{CorpusLoader, RetrievalEngine};
use audience_segmentation::SegmentationEngine;

use crate::observability::DegradationTracker;
use crate::{populate_span, retrieval_span, segmentation_span};

const RETRIEVAL: &str = "retrieval";
const SEGMENTATION: &str = "segmentation";

/// Shared handle to a running engine. Clones share the same corpus and index.
#[derive(Clone)]
pub struct AudienceEngine {
    inner: Arc<EngineInner>,
}

struct EngineInner {
    config: AudienceConfig,
    corpus: Corpus,
    index: Arc<dyn ISimilarityIndex>,
    populated: OnceLock<PopulateOutcome>,
    retrieval: RetrievalEngine,
    segmentation: SegmentationEngine,
    catalog: ProductCatalog,
    budget: BudgetSnapshot,
    tracker: Mutex<DegradationTracker>,
}

impl AudienceEngine {
    /// Validate `config`, load the corpus, and open the index.
    ///
    /// Only configuration errors are returned. A missing or malformed corpus
    /// yields the default customers; an index that cannot be opened leaves the
    /// engine on keyword-only search.
    pub fn init(config: AudienceConfig) -> AudienceResult<Self> {
        config.validate()?;
        let corpus = CorpusLoader::load(Path::new(&config.corpus.path));
        let index = VectorIndex::open(&config);
        info!(
            corpus_size = corpus.len(),
            index_available = index.available(),
            "audience engine initialized"
        );
        Ok(Self::with_parts(config, corpus, Arc::new(index)))
    }

    /// Assemble an engine from an already-built corpus and index.
    pub fn with_parts(
        config: AudienceConfig,
        corpus: Corpus,
        index: Arc<dyn ISimilarityIndex>,
    ) -> Self {
        let mut tracker = DegradationTracker::new();
        if let CorpusSource::Defaults { reason } = corpus.source() {
            tracker.record(DegradationEvent::now(
                "corpus",
                reason.clone(),
                "default_customers",
            ));
        }

        let inner = EngineInner {
            retrieval: RetrievalEngine::new(&config.retrieval),
            segmentation: SegmentationEngine::new(&config.segmentation),
            config,
            corpus,
            index,
            populated: OnceLock::new(),
            catalog: ProductCatalog::default(),
            budget: BudgetSnapshot::default(),
            tracker: Mutex::new(tracker),
        };
        let engine = Self {
            inner: Arc::new(inner),
        };
        engine.inner.collect_index_events();
        engine
    }

    pub fn config(&self) -> &AudienceConfig {
        &self.inner.config
    }

    pub fn corpus(&self) -> &Corpus {
        &self.inner.corpus
    }

    /// Populate the index from the corpus. Runs once; later calls return the
    /// first outcome.
    pub fn populate(&self) -> PopulateOutcome {
        self.inner.populate()
    }

    /// Rank customers for `request` and split them into segments.
    /// Populates the index first if that has not happened yet.
    pub fn segments(&self, request: &SegmentRequest) -> SegmentationResponse {
        self.inner.segments(request)
    }

    /// [`segments`](Self::segments) on the blocking thread pool.
    ///
    /// If the blocking task itself fails, the request is answered inline by
    /// keyword-only ranking.
    pub async fn segments_async(&self, request: SegmentRequest) -> SegmentationResponse {
        let inner = Arc::clone(&self.inner);
        let task_request = request.clone();
        match tokio::task::spawn_blocking(move || inner.segments(&task_request)).await {
            Ok(response) => response,
            Err(e) => {
                self.inner.record(DegradationEvent::now(
                    RETRIEVAL,
                    format!("blocking task failed: {e}"),
                    "keyword_only",
                ));
                self.inner.keyword_segments(&request)
            }
        }
    }

    /// Catalog products whose name contains `name`, case-insensitively.
    pub fn search_products(&self, name: &str, top_k: usize) -> Vec<Product> {
        self.inner.catalog.search(name, top_k)
    }

    pub fn budget(&self) -> BudgetSnapshot {
        self.inner.budget
    }

    pub fn health(&self) -> HealthReport {
        self.inner.health()
    }

    /// Take every degradation recorded so far, oldest first.
    pub fn drain_degradations(&self) -> Vec<DegradationEvent> {
        self.inner.collect_index_events();
        self.inner
            .tracker
            .lock()
            .map(|mut tracker| tracker.drain())
            .unwrap_or_default()
    }

    /// Release the index. Other clones of this handle keep it alive until
    /// they are dropped.
    pub fn close(self) {
        match Arc::try_unwrap(self.inner) {
            Ok(inner) => {
                drop(inner);
                info!("audience engine closed");
            }
            Err(_) => debug!("audience engine still shared, deferring close"),
        }
    }
}

impl EngineInner {
    fn populate(&self) -> PopulateOutcome {
        let outcome = self
            .populated
            .get_or_init(|| {
                let _span = populate_span!(self.corpus.len()).entered();
                self.index.populate(self.corpus.records())
            })
            .clone();
        self.collect_index_events();
        outcome
    }

    fn segments(&self, request: &SegmentRequest) -> SegmentationResponse {
        self.populate();

        let outcome = {
            let _span = retrieval_span!(request.product, request.query).entered();
            self.retrieval.retrieve(self.index.as_ref(), &self.corpus, request)
        };
        match outcome.degradation {
            Some(event) => self.record(event),
            None if outcome.path == SearchPath::Semantic => self.recovered(RETRIEVAL),
            None => {}
        }
        if outcome.customers.is_empty() {
            self.record(DegradationEvent::now(
                SEGMENTATION,
                "no customers ranked",
                "default_customers",
            ));
        } else {
            self.recovered(SEGMENTATION);
        }

        let _span = segmentation_span!(request.segment_type, outcome.customers.len()).entered();
        self.segmentation
            .segment(&outcome.customers, &request.segment_type, outcome.path)
    }

    /// Keyword-only answer used when the regular pipeline cannot run.
    fn keyword_segments(&self, request: &SegmentRequest) -> SegmentationResponse {
        let k = request.top_k.unwrap_or(self.config.retrieval.default_top_k);
        let ranked = keyword_only(&self.corpus, &request.query, k);
        self.segmentation.segment(
            &ranked,
            &request.segment_type,
            SearchPath::Fallback {
                reason: FallbackReason::QueryFailed,
            },
        )
    }

    fn record(&self, event: DegradationEvent) {
        match self.tracker.lock() {
            Ok(mut tracker) => tracker.record(event),
            Err(_) => warn!(component = %event.component, "degradation tracker poisoned, event dropped"),
        }
    }

    fn recovered(&self, component: &str) {
        if let Ok(mut tracker) = self.tracker.lock() {
            tracker.mark_recovered(component);
        }
    }

    fn collect_index_events(&self) {
        for event in self.index.drain_degradations() {
            self.record(event);
        }
    }

    fn health(&self) -> HealthReport {
        self.collect_index_events();
        let index_available = self.index.available();
        let indexed_documents = if index_available {
            self.index.count().ok()
        } else {
            None
        };
        let populate = self.populated.get().cloned();

        let (active_degradations, retrieval_degraded) = self
            .tracker
            .lock()
            .map(|tracker| (tracker.active_count(), tracker.is_degraded(RETRIEVAL)))
            .unwrap_or((0, false));
        let degraded = !index_available
            || retrieval_degraded
            || matches!(self.corpus.source(), CorpusSource::Defaults { .. })
            || populate.as_ref().is_some_and(PopulateOutcome::is_failure);

        HealthReport {
            status: if degraded {
                HealthStatus::Degraded
            } else {
                HealthStatus::Healthy
            },
            index_available,
            indexed_documents,
            corpus_size: self.corpus.len(),
            corpus_source: self.corpus.source().clone(),
            populate,
            active_degradations,
        }
    }
}
