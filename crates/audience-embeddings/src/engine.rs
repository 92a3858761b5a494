//! EmbeddingEngine: provider chain plus cache, with dimension checks.

use audience_core::config::EmbeddingConfig;
use audience_core::constants::MAX_BULK_BATCH_SIZE;
use audience_core::errors::{AudienceResult, EmbeddingError};
use audience_core::models::{DegradationEvent, IndexedDocument};
use tracing::{debug, info, warn};

use crate::cache::EmbeddingCache;
use crate::degradation::DegradationChain;
use crate::providers::{self, HashedTfIdf};

pub struct EmbeddingEngine {
    chain: DegradationChain,
    cache: EmbeddingCache,
    dimensions: usize,
}

impl EmbeddingEngine {
    /// Build the chain: the configured provider first, hashed TF-IDF last
    /// unless the configured provider already is TF-IDF. An unknown provider
    /// name is recorded as a degradation, not an error.
    pub fn new(config: &EmbeddingConfig) -> Self {
        let mut chain = DegradationChain::new();
        let needs_fallback = match providers::create_provider(config) {
            Ok(primary) => {
                let is_tfidf = primary.name() == providers::tfidf::PROVIDER_NAME;
                chain.push(primary);
                !is_tfidf
            }
            Err(e) => {
                warn!(provider = %config.provider, error = %e, "unknown embedding provider, using hashed TF-IDF");
                chain.record(DegradationEvent::now(
                    "embeddings",
                    e.to_string(),
                    providers::tfidf::PROVIDER_NAME,
                ));
                true
            }
        };
        if needs_fallback {
            chain.push(Box::new(HashedTfIdf::new(config.dimensions)));
        }

        info!(
            provider = chain.active_provider_name(),
            dims = config.dimensions,
            "embedding engine initialized"
        );

        Self {
            chain,
            cache: EmbeddingCache::new(config.l1_cache_size),
            dimensions: config.dimensions,
        }
    }

    /// Embed a query string.
    pub fn embed_query(&mut self, text: &str) -> AudienceResult<Vec<f32>> {
        let key = EmbeddingCache::key_for(text);
        if let Some(hit) = self.cache.get(&key) {
            debug!(key = %key, "query embedding cache hit");
            return Ok(hit);
        }
        let (embedding, _) = self.chain.embed(text)?;
        self.validate(&embedding)?;
        self.cache.insert(key, embedding.clone());
        Ok(embedding)
    }

    /// Embed documents in order, in batches of at most `MAX_BULK_BATCH_SIZE`.
    /// Documents are keyed by `content_hash` in the cache.
    pub fn embed_documents(&mut self, docs: &[IndexedDocument]) -> AudienceResult<Vec<Vec<f32>>> {
        let mut out: Vec<Option<Vec<f32>>> = docs
            .iter()
            .map(|d| self.cache.get(&d.content_hash))
            .collect();

        let missing: Vec<usize> = (0..docs.len()).filter(|&i| out[i].is_none()).collect();
        for batch in missing.chunks(MAX_BULK_BATCH_SIZE) {
            let texts: Vec<String> = batch.iter().map(|&i| docs[i].text.clone()).collect();
            let (vectors, provider) = self.chain.embed_batch(&texts)?;
            if vectors.len() != batch.len() {
                return Err(EmbeddingError::InferenceFailed {
                    reason: format!(
                        "{provider} returned {} vectors for {} texts",
                        vectors.len(),
                        batch.len()
                    ),
                }
                .into());
            }
            for (&i, vector) in batch.iter().zip(vectors) {
                self.validate(&vector)?;
                self.cache.insert(docs[i].content_hash.clone(), vector.clone());
                out[i] = Some(vector);
            }
        }

        Ok(out.into_iter().flatten().collect())
    }

    fn validate(&self, embedding: &[f32]) -> AudienceResult<()> {
        if embedding.len() != self.dimensions {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimensions,
                actual: embedding.len(),
            }
            .into());
        }
        Ok(())
    }

    pub fn drain_degradation_events(&mut self) -> Vec<DegradationEvent> {
        self.chain.drain_events()
    }

    /// Name of the provider currently serving requests. Stored alongside
    /// each embedding.
    pub fn active_provider(&self) -> &str {
        self.chain.active_provider_name()
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn cache(&self) -> &EmbeddingCache {
        &self.cache
    }

    /// Number of providers in the fallback chain.
    pub fn provider_count(&self) -> usize {
        self.chain.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use audience_core::customer::default_customers;

    fn engine(dims: usize) -> EmbeddingEngine {
        EmbeddingEngine::new(&EmbeddingConfig {
            dimensions: dims,
            ..Default::default()
        })
    }

    #[test]
    fn query_embedding_has_configured_dims() {
        let mut engine = engine(96);
        assert_eq!(engine.embed_query("budget student").unwrap().len(), 96);
        assert_eq!(engine.active_provider(), "hashed-tfidf");
    }

    #[test]
    fn tfidf_primary_is_not_duplicated() {
        assert_eq!(engine(32).provider_count(), 1);
        let degraded = EmbeddingEngine::new(&EmbeddingConfig {
            provider: "remote-api".to_string(),
            dimensions: 32,
            ..Default::default()
        });
        assert_eq!(degraded.provider_count(), 1);
    }

    #[test]
    fn repeated_query_hits_cache() {
        let mut engine = engine(64);
        let a = engine.embed_query("creative designer").unwrap();
        let b = engine.embed_query("creative designer").unwrap();
        assert_eq!(a, b);
        assert_eq!(engine.cache().len(), 1);
    }

    #[test]
    fn documents_embed_in_order() {
        let mut engine = engine(64);
        let docs: Vec<IndexedDocument> = default_customers()
            .iter()
            .map(IndexedDocument::from_customer)
            .collect();
        let vectors = engine.embed_documents(&docs).unwrap();
        assert_eq!(vectors.len(), 3);
        for (doc, vector) in docs.iter().zip(&vectors) {
            assert_eq!(engine.embed_query(&doc.text).unwrap(), *vector);
        }
    }

    #[test]
    fn unknown_provider_degrades_to_tfidf() {
        let mut engine = EmbeddingEngine::new(&EmbeddingConfig {
            provider: "remote-api".to_string(),
            dimensions: 32,
            ..Default::default()
        });
        assert_eq!(engine.embed_query("x y z").unwrap().len(), 32);
        let events = engine.drain_degradation_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].fallback_used, "hashed-tfidf");
    }
}
