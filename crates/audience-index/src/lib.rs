//! # audience-index
//!
//! The similarity index adapter. Availability is decided once, when the
//! store is opened; population runs at most once per adapter.

pub mod vector_index;

pub use vector_index::VectorIndex;
