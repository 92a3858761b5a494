//! In-memory embedding cache backed by moka.
//!
//! Keys are blake3 content hashes, so identical text is embedded once.

use std::time::Duration;

use moka::sync::Cache;

pub struct EmbeddingCache {
    cache: Cache<String, Vec<f32>>,
}

impl EmbeddingCache {
    pub fn new(max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_idle(Duration::from_secs(3600))
            .build();
        Self { cache }
    }

    /// Hash used as the cache key for `text`.
    pub fn key_for(text: &str) -> String {
        blake3::hash(text.as_bytes()).to_hex().to_string()
    }

    pub fn get(&self, key: &str) -> Option<Vec<f32>> {
        self.cache.get(key)
    }

    pub fn insert(&self, key: String, embedding: Vec<f32>) {
        self.cache.insert(key, embedding);
    }

    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let cache = EmbeddingCache::new(16);
        let key = EmbeddingCache::key_for("student budget");
        cache.insert(key.clone(), vec![0.5, 0.5]);
        assert_eq!(cache.get(&key), Some(vec![0.5, 0.5]));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn keys_are_content_addressed() {
        assert_eq!(EmbeddingCache::key_for("a b"), EmbeddingCache::key_for("a b"));
        assert_ne!(EmbeddingCache::key_for("a b"), EmbeddingCache::key_for("a c"));
    }

    #[test]
    fn clear_invalidates() {
        let cache = EmbeddingCache::new(16);
        cache.insert("k".to_string(), vec![1.0]);
        cache.clear();
        assert_eq!(cache.get("k"), None);
    }
}
