//! # audience-storage
//!
//! SQLite persistence for the similarity index: one writer connection, a
//! round-robin read pool for file-backed stores, versioned migrations, and
//! brute-force cosine search over stored embeddings.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use audience_core::errors::{AudienceError, StorageError};

/// Wrap a SQLite failure message as a storage error.
pub fn to_storage_err(message: String) -> AudienceError {
    StorageError::SqliteError { message }.into()
}
