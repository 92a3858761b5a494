//! Compiled default values for every config section.

// Storage
pub const DEFAULT_DB_PATH: &str = "audience_index.db";
pub const DEFAULT_READ_POOL_SIZE: usize = 4;
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;

// Corpus
pub const DEFAULT_CORPUS_PATH: &str = "data/customers.json";

// Embedding
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "tfidf";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 384;
pub const DEFAULT_L1_CACHE_SIZE: u64 = 10_000;

// Retrieval
pub const DEFAULT_TOP_K: usize = 10;
pub const DEFAULT_SEMANTIC_SCALE: f64 = 10.0;

// Segmentation
pub const DEFAULT_BASELINE_INCOME: f64 = 75_000.0;
pub const DEFAULT_INCOME_SENSITIVITY: f64 = 100_000.0;
pub const DEFAULT_PRIMARY_BASE_REACH: f64 = 35_000.0;
pub const DEFAULT_PRIMARY_CONVERSION_RATE: f64 = 0.035;
pub const DEFAULT_PRIMARY_CONFIDENCE: f64 = 0.85;
pub const DEFAULT_SECONDARY_BASE_REACH: f64 = 20_000.0;
pub const DEFAULT_SECONDARY_CONVERSION_RATE: f64 = 0.025;
pub const DEFAULT_SECONDARY_CONFIDENCE: f64 = 0.75;
pub const DEFAULT_EMPTY_REACH: u64 = 25_000;
pub const DEFAULT_EMPTY_CONVERSIONS: u64 = 75;
pub const DEFAULT_EMPTY_AVG_AGE: f64 = 28.0;
pub const DEFAULT_EMPTY_CONFIDENCE: f64 = 0.7;

// Observability
pub const DEFAULT_LOG_LEVEL: &str = "info";
