//! # audience-core
//!
//! Foundation crate for the audience segmentation engine.
//! Defines the customer data model, segment types, traits, errors, config,
//! and constants. Every other crate in the workspace depends on this.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod customer;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use catalog::{BudgetSnapshot, Product, ProductCatalog};
pub use config::AudienceConfig;
pub use customer::{Corpus, CorpusSource, CustomerRecord, ScoredCustomer};
pub use errors::{AudienceError, AudienceResult};
pub use models::{
    IndexHit, IndexedDocument, MetadataValue, PopulateOutcome, SegmentInsight,
    SegmentRequest, SegmentTier, SegmentationResponse,
};
