//! Keyword affinity between a campaign intent and a customer.
//!
//! The query selects at most one intent category, checked in a fixed order:
//! executive, then student, then creative. Only the selected category's
//! bonus can apply, even when the customer earns nothing from it.

use serde::{Deserialize, Serialize};

use audience_core::CustomerRecord;

/// Bonus for a demographics term match.
pub const DEMOGRAPHIC_MATCH_BONUS: f64 = 15.0;
/// Bonus for the income or age proxy when demographics do not match.
pub const PROXY_MATCH_BONUS: f64 = 12.0;

const EXECUTIVE_INCOME_FLOOR: i64 = 100_000;
const STUDENT_AGE_CEILING: i64 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentCategory {
    Executive,
    Student,
    Creative,
}

impl IntentCategory {
    /// Priority order used by [`IntentCategory::detect`].
    pub const ORDER: [IntentCategory; 3] = [Self::Executive, Self::Student, Self::Creative];

    /// Terms that select this category when found in the query.
    pub fn query_terms(self) -> &'static [&'static str] {
        match self {
            Self::Executive => &["executive", "business", "professional", "premium", "luxury"],
            Self::Student => &["student", "college", "budget", "affordable", "cheap"],
            Self::Creative => &["designer", "creative", "stylish", "aesthetic"],
        }
    }

    /// Terms looked for in a customer's demographics.
    pub fn demographic_terms(self) -> &'static [&'static str] {
        match self {
            Self::Executive => &["executive", "manager", "business", "ceo"],
            Self::Student => &["student", "college", "university"],
            Self::Creative => &["designer", "creative", "artist"],
        }
    }

    /// First category with a term contained in the lowercased query.
    pub fn detect(query: &str) -> Option<Self> {
        let query = query.to_lowercase();
        Self::ORDER
            .into_iter()
            .find(|category| contains_any(&query, category.query_terms()))
    }

    /// Bonus this category grants `customer`.
    pub fn affinity(self, customer: &CustomerRecord) -> f64 {
        let demographics = customer.demographics.to_lowercase();
        if contains_any(&demographics, self.demographic_terms()) {
            return DEMOGRAPHIC_MATCH_BONUS;
        }
        let proxy = match self {
            Self::Executive => customer.income > EXECUTIVE_INCOME_FLOOR,
            Self::Student => customer.age < STUDENT_AGE_CEILING,
            Self::Creative => false,
        };
        if proxy {
            PROXY_MATCH_BONUS
        } else {
            0.0
        }
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Keyword score of `customer` under an already-detected intent.
pub fn keyword_score(customer: &CustomerRecord, intent: Option<IntentCategory>) -> f64 {
    intent.map_or(0.0, |category| category.affinity(customer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_fixtures::customer;

    fn score(c: &CustomerRecord, query: &str) -> f64 {
        keyword_score(c, IntentCategory::detect(query))
    }

    #[test]
    fn senior_executive_premium_gift() {
        let c = customer("s1", 45, 140_000, "senior executive at tech firm");
        assert_eq!(score(&c, "premium executive gift"), 15.0);
    }

    #[test]
    fn university_student_affordable_deal() {
        let c = customer("s2", 20, 18_000, "university student");
        assert_eq!(score(&c, "affordable student deal"), 15.0);
    }

    #[test]
    fn proxies_apply_without_demographic_match() {
        let rich = customer("r", 50, 100_001, "nurse");
        let young = customer("y", 24, 10_000, "barista");
        assert_eq!(score(&rich, "LUXURY watch"), 12.0);
        assert_eq!(score(&young, "cheap earbuds"), 12.0);
        let at_floor = customer("f", 50, 100_000, "nurse");
        assert_eq!(score(&at_floor, "luxury watch"), 0.0);
    }

    #[test]
    fn creative_has_no_proxy() {
        let c = customer("c", 22, 200_000, "accountant");
        assert_eq!(score(&c, "stylish case"), 0.0);
        let d = customer("d", 40, 50_000, "Graphic Designer");
        assert_eq!(score(&d, "aesthetic case"), 15.0);
    }

    #[test]
    fn first_matching_category_wins() {
        // Executive intent is selected; the student match is never considered.
        let student = customer("st", 20, 15_000, "college student");
        assert_eq!(
            IntentCategory::detect("premium student bundle"),
            Some(IntentCategory::Executive)
        );
        assert_eq!(score(&student, "premium student bundle"), 0.0);
    }

    #[test]
    fn terms_match_as_substrings() {
        assert_eq!(
            IntentCategory::detect("for businesspeople"),
            Some(IntentCategory::Executive)
        );
        let c = customer("m", 30, 1, "office managerial staff");
        assert_eq!(score(&c, "business"), 15.0);
    }

    #[test]
    fn no_intent_scores_zero() {
        let c = customer("n", 20, 500_000, "ceo student designer");
        assert_eq!(IntentCategory::detect("noise cancelling headphones"), None);
        assert_eq!(score(&c, "noise cancelling headphones"), 0.0);
    }
}
