//! End-to-end embedding properties over customer documents.

use proptest::prelude::*;

use audience_core::config::EmbeddingConfig;
use audience_core::customer::default_customers;
use audience_core::IndexedDocument;
use audience_embeddings::EmbeddingEngine;

fn engine() -> EmbeddingEngine {
    EmbeddingEngine::new(&EmbeddingConfig::default())
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[test]
fn intent_queries_are_closest_to_matching_archetype() {
    let mut engine = engine();
    let docs: Vec<IndexedDocument> = default_customers()
        .iter()
        .map(IndexedDocument::from_customer)
        .collect();
    let vectors = engine.embed_documents(&docs).unwrap();

    let cases = [
        ("luxury business executive", 0),
        ("student budget social media", 1),
        ("creative designer freelancer", 2),
    ];
    for (query, expected) in cases {
        let q = engine.embed_query(query).unwrap();
        let best = vectors
            .iter()
            .enumerate()
            .max_by(|a, b| dot(&q, a.1).total_cmp(&dot(&q, b.1)))
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(best, expected, "query {query:?}");
    }
}

#[test]
fn large_batches_are_split() {
    let mut engine = engine();
    let docs: Vec<IndexedDocument> = (0..1_200)
        .map(|i| {
            let mut c = default_customers().remove(i % 3);
            c.id = format!("C{i}");
            c.location = format!("city {i}");
            IndexedDocument::from_customer(&c)
        })
        .collect();
    let vectors = engine.embed_documents(&docs).unwrap();
    assert_eq!(vectors.len(), docs.len());
    assert!(engine.drain_degradation_events().is_empty());
}

proptest! {
    #[test]
    fn prop_query_vectors_are_unit_or_zero(text in "[a-zA-Z ,.-]{0,80}") {
        let mut engine = engine();
        let v = engine.embed_query(&text).unwrap();
        prop_assert_eq!(v.len(), 384);
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        prop_assert!(norm == 0.0 || (norm - 1.0).abs() < 1e-4);
    }

    #[test]
    fn prop_embedding_is_deterministic(text in "[a-z ]{1,60}") {
        let a = engine().embed_query(&text).unwrap();
        let b = engine().embed_query(&text).unwrap();
        prop_assert_eq!(a, b);
    }
}
