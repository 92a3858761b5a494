//! Loads the persisted customer corpus, substituting the default archetypes
//! when the file cannot be read or parsed.
//!
//! Records are decoded one at a time: a record that cannot be decoded is
//! skipped with a warning. The file is rejected only when it lists records
//! and none of them decode.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use audience_core::errors::CorpusError;
use audience_core::{Corpus, CorpusSource, CustomerRecord};

/// Accepted file layouts.
#[derive(Deserialize)]
#[serde(untagged)]
enum CorpusFile {
    Wrapped { customers: Vec<Value> },
    Bare(Vec<Value>),
}

pub struct CorpusLoader;

impl CorpusLoader {
    /// Load the corpus at `path`. Never fails: unreadable or malformed files
    /// yield the default corpus with the failure recorded in its source.
    /// An empty but well-formed file is kept as an empty corpus.
    pub fn load(path: &Path) -> Corpus {
        match Self::try_load(path) {
            Ok(corpus) => corpus,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "corpus load failed, using default customers");
                Corpus::defaults(e.to_string())
            }
        }
    }

    /// Load the corpus at `path`, surfacing read and parse errors.
    pub fn try_load(path: &Path) -> Result<Corpus, CorpusError> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| CorpusError::Unreadable {
            path: display.clone(),
            reason: e.to_string(),
        })?;
        let raw = match serde_json::from_str::<CorpusFile>(&content) {
            Ok(CorpusFile::Wrapped { customers }) | Ok(CorpusFile::Bare(customers)) => customers,
            Err(e) => {
                return Err(CorpusError::Malformed {
                    path: display,
                    reason: e.to_string(),
                })
            }
        };

        let listed = raw.len();
        let records: Vec<CustomerRecord> = raw
            .into_iter()
            .enumerate()
            .filter_map(|(position, value)| match serde_json::from_value(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(position, error = %e, "skipping undecodable customer record");
                    None
                }
            })
            .collect();
        if listed > 0 && records.is_empty() {
            return Err(CorpusError::Malformed {
                path: display,
                reason: format!("none of {listed} customer records could be decoded"),
            });
        }

        let (corpus, duplicates) = Corpus::new(records, CorpusSource::File { path: display });
        if !duplicates.is_empty() {
            warn!(ids = ?duplicates, "dropped customers with duplicate ids");
        }
        info!(customers = corpus.len(), "corpus loaded");
        Ok(corpus)
    }
}
