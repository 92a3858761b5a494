//! Mapping between customer records and similarity-index documents.
//!
//! Index metadata may only hold primitives (string, integer, float, bool,
//! null). Every `CustomerRecord` field is mapped explicitly here; list fields
//! are flattened to comma-joined strings. [`CustomerRecord::from_metadata`] is
//! the inverse used when a hit has to be rebuilt from its stored metadata.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::DOC_ID_PREFIX;
use crate::customer::{split_list, CustomerRecord};
use crate::errors::IndexError;

/// A primitive value storable as index metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl MetadataValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Integer view. Floats with no fractional part are accepted.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for MetadataValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<MetadataValue>> From<Option<T>> for MetadataValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: ToString> From<&[T]> for MetadataValue {
    fn from(values: &[T]) -> Self {
        Self::Str(
            values
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

/// Index metadata keyed by field name. Ordered for stable serialization.
pub type Metadata = BTreeMap<String, MetadataValue>;

/// A searchable document derived from one customer record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedDocument {
    pub doc_id: String,
    /// Back-reference to `CustomerRecord::id`.
    pub customer_id: String,
    pub text: String,
    pub metadata: Metadata,
    /// blake3 of `text`.
    pub content_hash: String,
}

impl IndexedDocument {
    pub fn from_customer(customer: &CustomerRecord) -> Self {
        let text = document_text(customer);
        let content_hash = blake3::hash(text.as_bytes()).to_hex().to_string();
        Self {
            doc_id: doc_id_for(customer),
            customer_id: customer.id.clone(),
            text,
            metadata: customer_metadata(customer),
            content_hash,
        }
    }
}

/// `customer_{id}`, or `customer_{name}` when the id is blank.
pub fn doc_id_for(customer: &CustomerRecord) -> String {
    let key = if customer.id.trim().is_empty() {
        &customer.name
    } else {
        &customer.id
    };
    format!("{DOC_ID_PREFIX}{key}")
}

/// Searchable text: demographics, preferences, interests, age, income, location.
pub fn document_text(customer: &CustomerRecord) -> String {
    let raw = format!(
        "{} {} {} age {} income {} {}",
        customer.demographics,
        customer.preferences,
        customer.interests.join(", "),
        customer.age,
        customer.income,
        customer.location,
    );
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Flatten every customer field into index-storable primitives.
pub fn customer_metadata(customer: &CustomerRecord) -> Metadata {
    let mut metadata = Metadata::new();
    metadata.insert("id".into(), customer.id.as_str().into());
    metadata.insert("name".into(), customer.name.as_str().into());
    metadata.insert("age".into(), customer.age.into());
    metadata.insert("income".into(), customer.income.into());
    metadata.insert("demographics".into(), customer.demographics.as_str().into());
    metadata.insert("interests".into(), customer.interests.as_slice().into());
    metadata.insert("preferences".into(), customer.preferences.as_str().into());
    metadata.insert("location".into(), customer.location.as_str().into());
    metadata
}

impl CustomerRecord {
    /// Rebuild a record from index metadata.
    ///
    /// `id` may be stored as a string or an integer; `age`/`income` as an
    /// integer or an integral float. Missing text fields become empty.
    pub fn from_metadata(doc_id: &str, metadata: &Metadata) -> Result<Self, IndexError> {
        let decode = |reason: String| IndexError::DocumentDecode {
            doc_id: doc_id.to_string(),
            reason,
        };
        let text = |key: &str| -> String {
            match metadata.get(key) {
                Some(MetadataValue::Str(s)) => s.clone(),
                Some(MetadataValue::Int(n)) => n.to_string(),
                Some(MetadataValue::Float(f)) => f.to_string(),
                Some(MetadataValue::Bool(b)) => b.to_string(),
                Some(MetadataValue::Null) | None => String::new(),
            }
        };
        let int = |key: &str| -> Result<i64, IndexError> {
            metadata
                .get(key)
                .and_then(MetadataValue::as_i64)
                .ok_or_else(|| decode(format!("missing or non-integer field '{key}'")))
        };

        let id = match metadata.get("id") {
            Some(MetadataValue::Str(s)) if !s.is_empty() => s.clone(),
            Some(MetadataValue::Int(n)) => n.to_string(),
            _ => return Err(decode("missing field 'id'".to_string())),
        };

        Ok(Self {
            id,
            name: text("name"),
            age: int("age")?,
            income: int("income")?,
            demographics: text("demographics"),
            interests: split_list(&text("interests")),
            preferences: text("preferences"),
            location: text("location"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::default_customers;

    fn executive() -> CustomerRecord {
        default_customers().remove(0)
    }

    #[test]
    fn every_field_is_mapped() {
        let metadata = customer_metadata(&executive());
        let keys: Vec<&str> = metadata.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "age",
                "demographics",
                "id",
                "income",
                "interests",
                "location",
                "name",
                "preferences"
            ]
        );
    }

    #[test]
    fn field_types_map_to_primitives() {
        let metadata = customer_metadata(&executive());
        assert_eq!(metadata["id"], MetadataValue::Str("F001".into()));
        assert_eq!(metadata["age"], MetadataValue::Int(42));
        assert_eq!(metadata["income"], MetadataValue::Int(150_000));
        assert_eq!(
            metadata["interests"],
            MetadataValue::Str("Technology, Business, Travel".into())
        );
        assert_eq!(metadata["location"], MetadataValue::Str(String::new()));
    }

    #[test]
    fn optional_and_scalar_conversions() {
        assert_eq!(MetadataValue::from(None::<i64>), MetadataValue::Null);
        assert_eq!(MetadataValue::from(Some(3_i64)), MetadataValue::Int(3));
        assert_eq!(MetadataValue::from(true), MetadataValue::Bool(true));
        assert_eq!(MetadataValue::from(1.5), MetadataValue::Float(1.5));
        let empty: &[String] = &[];
        assert_eq!(MetadataValue::from(empty), MetadataValue::Str(String::new()));
    }

    #[test]
    fn metadata_rebuilds_record() {
        let original = executive();
        let doc = IndexedDocument::from_customer(&original);
        let rebuilt = CustomerRecord::from_metadata(&doc.doc_id, &doc.metadata).unwrap();
        assert_eq!(rebuilt, original);
    }

    #[test]
    fn from_metadata_accepts_integer_id_and_float_numbers() {
        let mut metadata = Metadata::new();
        metadata.insert("id".into(), MetadataValue::Int(7));
        metadata.insert("name".into(), "Jo".into());
        metadata.insert("age".into(), MetadataValue::Float(31.0));
        metadata.insert("income".into(), MetadataValue::Int(52_000));
        let record = CustomerRecord::from_metadata("customer_7", &metadata).unwrap();
        assert_eq!(record.id, "7");
        assert_eq!(record.age, 31);
        assert!(record.interests.is_empty());
    }

    #[test]
    fn from_metadata_rejects_fractional_age() {
        let mut metadata = customer_metadata(&executive());
        metadata.insert("age".into(), MetadataValue::Float(41.5));
        let err = CustomerRecord::from_metadata("customer_F001", &metadata).unwrap_err();
        assert!(err.to_string().contains("age"));
    }

    #[test]
    fn metadata_json_roundtrip_preserves_types() {
        let metadata = customer_metadata(&executive());
        let json = serde_json::to_string(&metadata).unwrap();
        let back: Metadata = serde_json::from_str(&json).unwrap();
        assert_eq!(back, metadata);
    }

    #[test]
    fn document_text_is_whitespace_normalized() {
        let text = document_text(&executive());
        assert!(text.starts_with("executive, high income"));
        assert!(text.contains("age 42 income 150000"));
        assert!(!text.contains("  "));
        assert!(!text.ends_with(' '));
    }

    #[test]
    fn doc_id_falls_back_to_name() {
        let mut customer = executive();
        assert_eq!(doc_id_for(&customer), "customer_F001");
        customer.id = " ".to_string();
        assert_eq!(doc_id_for(&customer), "customer_Tech Executive");
    }

    #[test]
    fn content_hash_tracks_text() {
        let a = IndexedDocument::from_customer(&executive());
        let mut changed = executive();
        changed.location = "Berlin".to_string();
        let b = IndexedDocument::from_customer(&changed);
        assert_ne!(a.content_hash, b.content_hash);
    }
}
