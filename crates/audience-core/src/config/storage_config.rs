use serde::{Deserialize, Serialize};

use super::defaults;

/// Similarity index storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the SQLite file holding indexed documents and embeddings.
    pub db_path: String,
    /// Keep the index in memory instead of on disk.
    pub in_memory: bool,
    /// Number of read connections for the file-backed store.
    pub read_pool_size: usize,
    /// SQLite busy timeout in milliseconds.
    pub busy_timeout_ms: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: defaults::DEFAULT_DB_PATH.to_string(),
            in_memory: false,
            read_pool_size: defaults::DEFAULT_READ_POOL_SIZE,
            busy_timeout_ms: defaults::DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}
