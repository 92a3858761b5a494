//! Retrieval across both paths: real index, unavailable index, failing index.

use std::sync::atomic::{AtomicUsize, Ordering};

use audience_core::config::{AudienceConfig, RetrievalConfig};
use audience_core::errors::{AudienceResult, IndexError};
use audience_core::models::{FallbackReason, IndexHit, SearchPath};
use audience_core::traits::ISimilarityIndex;
use audience_core::{Corpus, CustomerRecord, IndexedDocument, PopulateOutcome, SegmentRequest};
use audience_index::VectorIndex;
use audience_retrieval::RetrievalEngine;
use test_fixtures::{customer, load_customers};

/// Available index whose queries fail a configurable number of times.
struct FlakyIndex {
    docs: Vec<CustomerRecord>,
    failures_left: AtomicUsize,
}

impl ISimilarityIndex for FlakyIndex {
    fn available(&self) -> bool {
        true
    }

    fn count(&self) -> AudienceResult<usize> {
        Ok(self.docs.len())
    }

    fn populate(&self, _corpus: &[CustomerRecord]) -> PopulateOutcome {
        PopulateOutcome::AlreadyPopulated {
            total: self.docs.len(),
        }
    }

    fn query(&self, _text: &str, k: usize) -> AudienceResult<Vec<IndexHit>> {
        if self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(IndexError::QueryFailed {
                reason: "simulated timeout".to_string(),
            }
            .into());
        }
        Ok(self
            .docs
            .iter()
            .take(k)
            .enumerate()
            .map(|(i, c)| {
                let doc = IndexedDocument::from_customer(c);
                IndexHit {
                    doc_id: doc.doc_id,
                    customer_id: doc.customer_id,
                    document: doc.text,
                    metadata: doc.metadata,
                    distance: 0.1 * i as f64,
                }
            })
            .collect())
    }
}

fn engine() -> RetrievalEngine {
    RetrievalEngine::new(&RetrievalConfig::default())
}

#[test]
fn unavailable_index_uses_keyword_fallback() {
    let config = AudienceConfig::in_memory();
    let index = VectorIndex::unavailable(&config, "disabled");
    let corpus = Corpus::from_records(vec![
        customer("match", 20, 18_000, "university student"),
        customer("miss", 45, 90_000, "nurse"),
    ]);

    let outcome = engine().retrieve(&index, &corpus, &SegmentRequest::new("Earbuds", "budget student"));
    assert_eq!(
        outcome.path,
        SearchPath::Fallback {
            reason: FallbackReason::IndexUnavailable
        }
    );
    assert!(outcome.degradation.is_none());
    assert_eq!(outcome.customers.len(), 1);
    assert_eq!(outcome.customers[0].id(), "match");
    assert!(outcome.customers[0].relevance_score > 0.0);
}

#[test]
fn failed_query_degrades_that_call_only() {
    let corpus = Corpus::from_records(load_customers("customers.json"));
    let index = FlakyIndex {
        docs: corpus.records().to_vec(),
        failures_left: AtomicUsize::new(1),
    };
    let request = SegmentRequest::new("Smart Watch", "luxury executive");

    let first = engine().retrieve(&index, &corpus, &request);
    assert_eq!(
        first.path,
        SearchPath::Fallback {
            reason: FallbackReason::QueryFailed
        }
    );
    let event = first.degradation.expect("query failure is recorded");
    assert_eq!(event.fallback_used, "keyword_only");
    assert!(first.customers.iter().all(|c| c.relevance_score > 0.0));

    let second = engine().retrieve(&index, &corpus, &request);
    assert_eq!(second.path, SearchPath::Semantic);
    assert!(second.degradation.is_none());
}

#[test]
fn semantic_path_combines_distance_and_keywords() {
    let records = vec![
        customer("near", 30, 50_000, "nurse"),
        customer("exec", 50, 200_000, "business owner"),
    ];
    let corpus = Corpus::from_records(records.clone());
    let index = FlakyIndex {
        docs: records,
        failures_left: AtomicUsize::new(0),
    };

    let outcome = engine().retrieve(&index, &corpus, &SegmentRequest::new("Watch", "premium"));
    assert_eq!(outcome.path, SearchPath::Semantic);
    // near: 10.0 semantic, no affinity; exec: 9.0 semantic + 15 keyword.
    let scores: Vec<(&str, f64)> = outcome
        .customers
        .iter()
        .map(|c| (c.id(), c.relevance_score))
        .collect();
    assert_eq!(scores, vec![("exec", 24.0), ("near", 10.0)]);
}

#[test]
fn semantic_path_keeps_zero_scores_and_truncates() {
    let records: Vec<CustomerRecord> = (0..15)
        .map(|i| customer(&format!("c{i:02}"), 30, 40_000, "teacher"))
        .collect();
    let corpus = Corpus::from_records(records.clone());
    let index = FlakyIndex {
        docs: records,
        failures_left: AtomicUsize::new(0),
    };

    let outcome = engine().retrieve(
        &index,
        &corpus,
        &SegmentRequest::new("Headphones", "noise cancelling").with_top_k(12),
    );
    assert_eq!(outcome.customers.len(), 12);
    assert_eq!(outcome.customers.last().unwrap().relevance_score, 0.0);
}

#[test]
fn empty_available_index_falls_back() {
    let index = VectorIndex::open(&AudienceConfig::in_memory());
    let corpus = Corpus::defaults("test");
    let outcome = engine().retrieve(&index, &corpus, &SegmentRequest::new("Case", "creative"));
    assert_eq!(
        outcome.path,
        SearchPath::Fallback {
            reason: FallbackReason::EmptyIndex
        }
    );
    assert_eq!(outcome.customers.len(), 1);
    assert_eq!(outcome.customers[0].id(), "F003");
}

#[test]
fn real_index_ranks_student_intent_first() {
    let index = VectorIndex::open(&AudienceConfig::in_memory());
    let corpus = Corpus::from_records(load_customers("customers.json"));
    index.populate(corpus.records());

    let request = SegmentRequest::new("Wireless Headphones", "affordable for college students")
        .with_top_k(12);
    let outcome = engine().retrieve(&index, &corpus, &request);
    assert_eq!(outcome.path, SearchPath::Semantic);
    assert_eq!(outcome.customers.len(), 12);

    // Student bonuses (15 or 12) beat the 10-point semantic ceiling.
    let mut top: Vec<&str> = outcome.customers[..3].iter().map(|c| c.id()).collect();
    top.sort_unstable();
    assert_eq!(top, vec!["C003", "C004", "C008"]);
    assert!(outcome.customers[3].relevance_score <= 10.0);
}

#[test]
fn hits_missing_from_corpus_are_rebuilt_from_metadata() {
    let stored = vec![customer("gone", 20, 10_000, "college student")];
    let index = FlakyIndex {
        docs: stored,
        failures_left: AtomicUsize::new(0),
    };
    let corpus = Corpus::from_records(Vec::new());

    let outcome = engine().retrieve(&index, &corpus, &SegmentRequest::new("Pen", "student"));
    assert_eq!(outcome.customers.len(), 1);
    assert_eq!(outcome.customers[0].customer.demographics, "college student");
    assert_eq!(outcome.customers[0].relevance_score, 25.0);
}
