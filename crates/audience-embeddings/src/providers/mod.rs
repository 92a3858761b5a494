//! Embedding providers and name-based construction.

pub mod tfidf;

use audience_core::config::EmbeddingConfig;
use audience_core::errors::{AudienceResult, EmbeddingError};
use audience_core::traits::IEmbeddingProvider;

pub use tfidf::HashedTfIdf;

/// Build the provider named in `config`.
pub fn create_provider(config: &EmbeddingConfig) -> AudienceResult<Box<dyn IEmbeddingProvider>> {
    match config.provider.trim().to_ascii_lowercase().as_str() {
        "tfidf" | "tf-idf" | tfidf::PROVIDER_NAME => {
            Ok(Box::new(HashedTfIdf::new(config.dimensions)))
        }
        _ => Err(EmbeddingError::UnknownProvider {
            name: config.provider.clone(),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tfidf_aliases_resolve() {
        for name in ["tfidf", "TF-IDF", " hashed-tfidf "] {
            let config = EmbeddingConfig {
                provider: name.to_string(),
                dimensions: 32,
                ..Default::default()
            };
            let provider = create_provider(&config).unwrap();
            assert_eq!(provider.dimensions(), 32);
        }
    }

    #[test]
    fn unknown_provider_is_an_error() {
        let config = EmbeddingConfig {
            provider: "onnx".to_string(),
            ..Default::default()
        };
        assert!(create_provider(&config).is_err());
    }
}
