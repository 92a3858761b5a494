//! RetrievalEngine: semantic path through the index, keyword-only fallback.

use tracing::{debug, warn};

use audience_core::config::RetrievalConfig;
use audience_core::errors::AudienceResult;
use audience_core::models::{DegradationEvent, FallbackReason, SearchPath};
use audience_core::traits::ISimilarityIndex;
use audience_core::{Corpus, CustomerRecord, ScoredCustomer, SegmentRequest};

use crate::fallback;
use crate::ranking;
use crate::scoring::{HybridScorer, IntentCategory};

const COMPONENT: &str = "retrieval";

/// Ranked customers for one request and how they were produced.
#[derive(Debug, Clone)]
pub struct RetrievalOutcome {
    pub customers: Vec<ScoredCustomer>,
    pub path: SearchPath,
    /// Set when this request degraded to the fallback path for a reason that
    /// was not already recorded when the index was opened.
    pub degradation: Option<DegradationEvent>,
}

pub struct RetrievalEngine {
    scorer: HybridScorer,
    default_top_k: usize,
}

impl RetrievalEngine {
    pub fn new(config: &RetrievalConfig) -> Self {
        Self {
            scorer: HybridScorer::new(config),
            default_top_k: config.default_top_k,
        }
    }

    /// Rank customers for `request`. Never fails: index problems route the
    /// request to the keyword-only fallback.
    pub fn retrieve(
        &self,
        index: &dyn ISimilarityIndex,
        corpus: &Corpus,
        request: &SegmentRequest,
    ) -> RetrievalOutcome {
        let k = request.top_k.unwrap_or(self.default_top_k);

        if !index.available() {
            debug!("index unavailable, ranking by keyword only");
            return self.fallback(corpus, request, k, FallbackReason::IndexUnavailable, None);
        }

        match self.semantic(index, corpus, request, k) {
            Ok(Some(customers)) => RetrievalOutcome {
                customers,
                path: SearchPath::Semantic,
                degradation: None,
            },
            Ok(None) => {
                warn!("index holds no documents, ranking by keyword only");
                let event = DegradationEvent::now(COMPONENT, "index empty", "keyword_only");
                self.fallback(corpus, request, k, FallbackReason::EmptyIndex, Some(event))
            }
            Err(e) => {
                warn!(error = %e, "index query failed, ranking by keyword only");
                let event = DegradationEvent::now(
                    COMPONENT,
                    format!("index query failed: {e}"),
                    "keyword_only",
                );
                self.fallback(corpus, request, k, FallbackReason::QueryFailed, Some(event))
            }
        }
    }

    /// `Ok(None)` when the index is empty.
    fn semantic(
        &self,
        index: &dyn ISimilarityIndex,
        corpus: &Corpus,
        request: &SegmentRequest,
        k: usize,
    ) -> AudienceResult<Option<Vec<ScoredCustomer>>> {
        if index.count()? == 0 {
            return Ok(None);
        }
        let hits = index.query(&request.search_text(), k)?;
        let intent = IntentCategory::detect(&request.query);

        let mut scored = Vec::with_capacity(hits.len());
        for hit in hits {
            let customer = match corpus.get(&hit.customer_id) {
                Some(record) => record.clone(),
                None => match CustomerRecord::from_metadata(&hit.doc_id, &hit.metadata) {
                    Ok(record) => record,
                    Err(e) => {
                        warn!(doc_id = %hit.doc_id, error = %e, "skipping undecodable index hit");
                        continue;
                    }
                },
            };
            let score = self.scorer.score_hit(&customer, hit.distance, intent);
            debug!(customer_id = %customer.id, distance = hit.distance, score, "scored hit");
            scored.push(ScoredCustomer::new(customer, score));
        }
        Ok(Some(ranking::rank(scored, k)))
    }

    fn fallback(
        &self,
        corpus: &Corpus,
        request: &SegmentRequest,
        k: usize,
        reason: FallbackReason,
        degradation: Option<DegradationEvent>,
    ) -> RetrievalOutcome {
        RetrievalOutcome {
            customers: fallback::keyword_only(corpus, &request.query, k),
            path: SearchPath::Fallback { reason },
            degradation,
        }
    }
}
