/// Similarity index errors.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("similarity index unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("index query failed: {reason}")]
    QueryFailed { reason: String },

    #[error("cannot decode document {doc_id}: {reason}")]
    DocumentDecode { doc_id: String, reason: String },
}
