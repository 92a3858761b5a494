use serde::{Deserialize, Serialize};

use super::defaults;

/// Location of the persisted customer corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    pub path: String,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            path: defaults::DEFAULT_CORPUS_PATH.to_string(),
        }
    }
}
