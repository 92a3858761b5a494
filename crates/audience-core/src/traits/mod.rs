pub mod embedding;
pub mod similarity_index;

pub use embedding::IEmbeddingProvider;
pub use similarity_index::ISimilarityIndex;
