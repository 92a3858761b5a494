//! The loaded customer corpus and where it came from.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{default_customers, CustomerRecord};

/// Origin of the records held by a [`Corpus`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CorpusSource {
    /// Loaded from a persisted corpus file.
    File { path: String },
    /// The fixed default archetypes, substituted after a load failure.
    Defaults { reason: String },
    /// Built in memory by the caller.
    Provided,
}

/// Immutable, id-indexed customer set.
#[derive(Debug, Clone)]
pub struct Corpus {
    records: Vec<CustomerRecord>,
    by_id: HashMap<String, usize>,
    source: CorpusSource,
}

impl Corpus {
    /// Build a corpus. Records whose id was already seen are dropped;
    /// the dropped ids are returned alongside the corpus.
    pub fn new(records: Vec<CustomerRecord>, source: CorpusSource) -> (Self, Vec<String>) {
        let mut kept = Vec::with_capacity(records.len());
        let mut by_id = HashMap::with_capacity(records.len());
        let mut duplicates = Vec::new();
        for record in records {
            if by_id.contains_key(&record.id) {
                duplicates.push(record.id);
                continue;
            }
            by_id.insert(record.id.clone(), kept.len());
            kept.push(record);
        }
        (
            Self {
                records: kept,
                by_id,
                source,
            },
            duplicates,
        )
    }

    /// Corpus of caller-supplied records; later duplicates are dropped.
    pub fn from_records(records: Vec<CustomerRecord>) -> Self {
        Self::new(records, CorpusSource::Provided).0
    }

    /// Corpus of the fixed default archetypes.
    pub fn defaults(reason: impl Into<String>) -> Self {
        Self::new(
            default_customers(),
            CorpusSource::Defaults {
                reason: reason.into(),
            },
        )
        .0
    }

    pub fn records(&self) -> &[CustomerRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&CustomerRecord> {
        self.by_id.get(id).map(|&i| &self.records[i])
    }

    pub fn source(&self) -> &CorpusSource {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CustomerRecord> {
        self.records.iter()
    }
}
