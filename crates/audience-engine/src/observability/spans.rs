//! Span definitions for the request lifecycle: populate, retrieval, segmentation.

/// Create a population span.
#[macro_export]
macro_rules! populate_span {
    ($corpus_size:expr) => {
        tracing::info_span!("audience.populate", corpus_size = $corpus_size)
    };
}

/// Create a retrieval span.
#[macro_export]
macro_rules! retrieval_span {
    ($product:expr, $query:expr) => {
        tracing::info_span!("audience.retrieval", product = %$product, query = %$query)
    };
}

/// Create a segmentation span.
#[macro_export]
macro_rules! segmentation_span {
    ($segment_type:expr, $ranked:expr) => {
        tracing::info_span!("audience.segmentation", segment_type = %$segment_type, ranked = $ranked)
    };
}

