//! Configuration for the audience engine.
//! TOML-based; resolution order is env (`AUDIENCE_*`) > file > compiled defaults.

pub mod audience_config;
pub mod corpus_config;
pub mod defaults;
pub mod embedding_config;
pub mod observability_config;
pub mod retrieval_config;
pub mod segmentation_config;
pub mod storage_config;

pub use audience_config::AudienceConfig;
pub use corpus_config::CorpusConfig;
pub use embedding_config::EmbeddingConfig;
pub use observability_config::ObservabilityConfig;
pub use retrieval_config::RetrievalConfig;
pub use segmentation_config::{EmptySegmentDefaults, SegmentationConfig, TierParams};
pub use storage_config::StorageConfig;
