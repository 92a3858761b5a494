//! # audience-embeddings
//!
//! Turns document and query text into dense vectors for the similarity index.
//! Providers are tried in order through a [`DegradationChain`]; the hashed
//! TF-IDF provider is always last so embedding never depends on an external
//! model being present.

pub mod cache;
pub mod degradation;
pub mod engine;
pub mod providers;

pub use cache::EmbeddingCache;
pub use degradation::DegradationChain;
pub use engine::EmbeddingEngine;
