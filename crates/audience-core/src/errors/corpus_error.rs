/// Customer corpus loading errors.
///
/// These never escape the corpus loader: every variant is recovered by
/// substituting the default corpus.
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("cannot read corpus {path}: {reason}")]
    Unreadable { path: String, reason: String },

    #[error("malformed corpus {path}: {reason}")]
    Malformed { path: String, reason: String },
}
