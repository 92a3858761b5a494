//! Hashed TF-IDF provider.
//!
//! Terms are hashed (FNV-1a) into a fixed number of buckets with a hash-derived
//! sign, weighted by sublinear term frequency and a length-based IDF proxy, then
//! L2-normalized. Deterministic and dependency-free.

use std::collections::BTreeMap;

use audience_core::errors::AudienceResult;
use audience_core::traits::IEmbeddingProvider;

pub const PROVIDER_NAME: &str = "hashed-tfidf";

/// Terms that carry no signal about a customer.
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "for", "in", "of", "on", "or", "the", "to", "with",
];

pub struct HashedTfIdf {
    dimensions: usize,
}

impl HashedTfIdf {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    fn fnv1a(term: &str) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325;
        for b in term.as_bytes() {
            h ^= u64::from(*b);
            h = h.wrapping_mul(0x0100_0000_01b3);
        }
        h
    }

    /// Lowercased alphanumeric terms. Hyphenated words stay whole.
    pub fn tokenize(text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric() && c != '-')
            .map(|t| t.trim_matches('-').to_lowercase())
            .filter(|t| !t.is_empty() && !STOPWORDS.contains(&t.as_str()))
            .collect()
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut vec = vec![0.0f32; self.dimensions];

        let mut counts: BTreeMap<String, u32> = BTreeMap::new();
        for term in Self::tokenize(text) {
            *counts.entry(term).or_default() += 1;
        }

        for (term, count) in &counts {
            let h = Self::fnv1a(term);
            let bucket = (h % self.dimensions as u64) as usize;
            let sign = if h >> 63 == 0 { 1.0 } else { -1.0 };
            let tf = 1.0 + (*count as f32).ln();
            let idf = 1.0 + (term.chars().count() as f32).ln();
            vec[bucket] += sign * tf * idf;
        }

        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            vec.iter_mut().for_each(|v| *v /= norm);
        }
        vec
    }
}

impl IEmbeddingProvider for HashedTfIdf {
    fn embed(&self, text: &str) -> AudienceResult<Vec<f32>> {
        Ok(self.vectorize(text))
    }

    fn embed_batch(&self, texts: &[String]) -> AudienceResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.vectorize(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn is_available(&self) -> bool {
        true
    }
}
