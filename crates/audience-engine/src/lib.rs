//! # audience-engine
//!
//! The composition root. [`AudienceEngine`] owns the customer corpus and the
//! similarity index for its lifetime and serves segmentation requests over
//! them. Nothing is held in module-level state: callers construct the engine,
//! share it (it is cheap to clone), and close it.

pub mod engine;
pub mod observability;

pub use engine::AudienceEngine;
pub use observability::{init_tracing, DegradationTracker};
