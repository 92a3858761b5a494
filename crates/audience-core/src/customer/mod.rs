//! Customer records as loaded from the persisted corpus.

pub mod corpus;
pub mod defaults;

use serde::{Deserialize, Deserializer, Serialize};

pub use corpus::{Corpus, CorpusSource};
pub use defaults::default_customers;

/// A known customer. Loaded once and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    /// Unique across the corpus. Persisted corpora may store it as a string or an integer.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Whole number; a JSON float such as `30.0` is accepted and truncated.
    #[serde(deserialize_with = "deserialize_whole_number")]
    pub age: i64,
    #[serde(deserialize_with = "deserialize_whole_number")]
    pub income: i64,
    #[serde(default)]
    pub demographics: String,
    /// Accepts a JSON list or a single comma-separated string.
    #[serde(default, deserialize_with = "deserialize_interests")]
    pub interests: Vec<String>,
    #[serde(default)]
    pub preferences: String,
    #[serde(default)]
    pub location: String,
}

/// A customer with the hybrid relevance score computed for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCustomer {
    #[serde(flatten)]
    pub customer: CustomerRecord,
    /// Always `>= 0`.
    pub relevance_score: f64,
}

impl ScoredCustomer {
    /// Clamps negative and NaN scores to zero.
    pub fn new(customer: CustomerRecord, relevance_score: f64) -> Self {
        Self {
            customer,
            relevance_score: relevance_score.max(0.0),
        }
    }

    pub fn id(&self) -> &str {
        &self.customer.id
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
    Float(f64),
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
        RawId::Float(f) => f.to_string(),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Int(i64),
    Float(f64),
}

fn deserialize_whole_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawNumber::deserialize(deserializer)? {
        RawNumber::Int(n) => n,
        RawNumber::Float(f) => f.trunc() as i64,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawInterests {
    List(Vec<String>),
    Text(String),
    Null(()),
}

fn deserialize_interests<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawInterests::deserialize(deserializer)? {
        RawInterests::List(items) => items,
        RawInterests::Text(text) => split_list(&text),
        RawInterests::Null(()) => Vec::new(),
    })
}

/// Split a comma-joined list, trimming entries and dropping empties.
pub fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
