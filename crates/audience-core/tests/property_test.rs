//! Property tests for record mapping and corpus construction.

use proptest::prelude::*;

use audience_core::customer::split_list;
use audience_core::{Corpus, CorpusSource, CustomerRecord, IndexedDocument};

fn arb_customer() -> impl Strategy<Value = CustomerRecord> {
    (
        "[A-Z][0-9]{1,4}",
        "[a-zA-Z ]{1,20}",
        0i64..100,
        0i64..500_000,
        "[a-z ,]{0,40}",
        prop::collection::vec("[A-Za-z][A-Za-z ]{0,10}[A-Za-z]", 0..4),
        "[a-z ]{0,30}",
        "[A-Za-z]{0,12}",
    )
        .prop_map(
            |(id, name, age, income, demographics, interests, preferences, location)| {
                CustomerRecord {
                    id,
                    name,
                    age,
                    income,
                    demographics,
                    interests,
                    preferences,
                    location,
                }
            },
        )
}

proptest! {
    #[test]
    fn prop_metadata_rebuilds_record(customer in arb_customer()) {
        let doc = IndexedDocument::from_customer(&customer);
        let rebuilt = CustomerRecord::from_metadata(&doc.doc_id, &doc.metadata).unwrap();
        prop_assert_eq!(rebuilt, customer);
    }

    #[test]
    fn prop_document_id_is_prefixed(customer in arb_customer()) {
        let doc = IndexedDocument::from_customer(&customer);
        prop_assert_eq!(doc.doc_id, format!("customer_{}", customer.id));
        prop_assert_eq!(doc.customer_id, customer.id);
    }

    #[test]
    fn prop_corpus_ids_are_unique(records in prop::collection::vec(arb_customer(), 0..30)) {
        let input_len = records.len();
        let (corpus, dropped) = Corpus::new(records, CorpusSource::Provided);
        prop_assert_eq!(corpus.len() + dropped.len(), input_len);
        let mut ids: Vec<&str> = corpus.iter().map(|c| c.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), corpus.len());
    }

    #[test]
    fn prop_split_list_entries_are_trimmed(text in "[a-z ,]{0,60}") {
        for entry in split_list(&text) {
            prop_assert!(!entry.is_empty());
            prop_assert_eq!(entry.trim(), entry.as_str());
            prop_assert!(!entry.contains(','));
        }
    }
}
