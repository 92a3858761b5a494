//! # audience-segmentation
//!
//! Slices a ranked customer list into a primary and a secondary tier and
//! derives market-sizing figures for each. Pure computation: no I/O, no
//! shared state.

pub mod engine;
pub mod insights;

pub use engine::SegmentationEngine;
pub use insights::InsightCalculator;
