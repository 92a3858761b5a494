//! # audience-retrieval
//!
//! Finds the customers relevant to a (product, intent) request. Index hits are
//! scored by semantic closeness plus keyword affinity; when the index cannot
//! serve, every corpus record is scored by keyword affinity alone.

pub mod corpus;
pub mod engine;
pub mod fallback;
pub mod ranking;
pub mod scoring;

pub use corpus::CorpusLoader;
pub use engine::{RetrievalEngine, RetrievalOutcome};
pub use scoring::{HybridScorer, IntentCategory};
