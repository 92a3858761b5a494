/// Engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prefix applied to customer ids to form index document ids.
pub const DOC_ID_PREFIX: &str = "customer_";

/// Maximum number of documents embedded and written per batch during population.
pub const MAX_BULK_BATCH_SIZE: usize = 500;

/// Number of customers in each segment tier.
pub const SEGMENT_SIZE: usize = 3;

/// Decimal places kept on hybrid relevance scores.
pub const SCORE_DECIMALS: u32 = 2;

/// Environment variable read for the tracing filter.
pub const LOG_ENV_VAR: &str = "AUDIENCE_LOG";
