//! Error handling for the audience engine.
//! One error enum per subsystem, `thiserror` only, aggregated into `AudienceError`.

pub mod config_error;
pub mod corpus_error;
pub mod embedding_error;
pub mod index_error;
pub mod storage_error;

pub use config_error::ConfigError;
pub use corpus_error::CorpusError;
pub use embedding_error::EmbeddingError;
pub use index_error::IndexError;
pub use storage_error::StorageError;

/// Top-level error type. Subsystem errors convert into it via `From`.
#[derive(Debug, thiserror::Error)]
pub enum AudienceError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("index error: {0}")]
    Index(#[from] IndexError),

    #[error("corpus error: {0}")]
    Corpus(#[from] CorpusError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type AudienceResult<T> = Result<T, AudienceError>;
