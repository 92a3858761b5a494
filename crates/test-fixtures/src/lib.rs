//! Fixture loader for customer corpora used across the workspace's tests.
//!
//! Fixtures live in this crate's `data/` directory:
//! - `customers.json`: twelve customers under a `customers` key
//! - `customers_numeric_ids.json`: bare array, integer ids, comma-string interests
//! - `customers_duplicates.json`: repeated ids
//! - `empty.json`: an empty `customers` list
//! - `malformed.json`: invalid JSON

use std::path::PathBuf;

use audience_core::CustomerRecord;
use serde::de::DeserializeOwned;
use serde::Deserialize;

fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Absolute path of a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixture_path(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CorpusFile {
    Wrapped { customers: Vec<CustomerRecord> },
    Bare(Vec<CustomerRecord>),
}

/// Load the customer records of a corpus fixture, wrapped or bare.
pub fn load_customers(relative_path: &str) -> Vec<CustomerRecord> {
    match load_fixture::<CorpusFile>(relative_path) {
        CorpusFile::Wrapped { customers } => customers,
        CorpusFile::Bare(customers) => customers,
    }
}

/// Write `records` to a temporary corpus file under a `customers` key.
pub fn write_corpus(dir: &std::path::Path, name: &str, records: &[CustomerRecord]) -> PathBuf {
    let path = dir.join(name);
    let body = serde_json::json!({ "customers": records });
    std::fs::write(&path, body.to_string())
        .unwrap_or_else(|e| panic!("failed to write corpus {}: {e}", path.display()));
    path
}

/// A customer with only the scoring-relevant fields set.
pub fn customer(id: &str, age: i64, income: i64, demographics: &str) -> CustomerRecord {
    CustomerRecord {
        id: id.to_string(),
        name: format!("Customer {id}"),
        age,
        income,
        demographics: demographics.to_string(),
        interests: Vec::new(),
        preferences: String::new(),
        location: String::new(),
    }
}
