//! Deterministic ordering of scored customers.

use audience_core::ScoredCustomer;

/// Stable sort by score descending, then truncate to `k`.
/// Equal scores keep their incoming order.
pub fn rank(mut customers: Vec<ScoredCustomer>, k: usize) -> Vec<ScoredCustomer> {
    customers.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
    customers.truncate(k);
    customers
}
