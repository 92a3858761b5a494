//! Keyword-only ranking over the whole corpus, used when the index cannot serve.

use audience_core::{Corpus, ScoredCustomer};

use crate::ranking;
use crate::scoring::{keyword_score, IntentCategory};

/// Score every record by keyword affinity, keep strictly positive scores,
/// and rank. Ties keep corpus order.
pub fn keyword_only(corpus: &Corpus, query: &str, k: usize) -> Vec<ScoredCustomer> {
    let Some(intent) = IntentCategory::detect(query) else {
        return Vec::new();
    };
    let matches = corpus
        .iter()
        .filter_map(|customer| {
            let score = keyword_score(customer, Some(intent));
            (score > 0.0).then(|| ScoredCustomer::new(customer.clone(), score))
        })
        .collect();
    ranking::rank(matches, k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_fixtures::customer;

    #[test]
    fn only_positive_scores_survive() {
        let corpus = Corpus::from_records(vec![
            customer("match", 20, 15_000, "college student"),
            customer("miss", 40, 60_000, "accountant"),
        ]);
        let result = keyword_only(&corpus, "budget student", 10);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id(), "match");
        assert!(result[0].relevance_score > 0.0);
    }

    #[test]
    fn demographic_matches_outrank_proxies() {
        let corpus = Corpus::from_records(vec![
            customer("young", 22, 15_000, "barista"),
            customer("enrolled", 30, 15_000, "university student"),
            customer("young2", 19, 15_000, "cashier"),
        ]);
        let result = keyword_only(&corpus, "cheap", 10);
        let ids: Vec<&str> = result.iter().map(ScoredCustomer::id).collect();
        assert_eq!(ids, vec!["enrolled", "young", "young2"]);
        assert_eq!(keyword_only(&corpus, "cheap", 1).len(), 1);
    }

    #[test]
    fn no_intent_means_no_results() {
        let corpus = Corpus::defaults("test");
        assert!(keyword_only(&corpus, "wireless earbuds", 10).is_empty());
    }
}
