pub mod degradation_event;
pub mod health_report;
pub mod index_hit;
pub mod indexed_document;
pub mod populate_outcome;
pub mod request;
pub mod segment;

pub use degradation_event::DegradationEvent;
pub use health_report::{HealthReport, HealthStatus};
pub use index_hit::IndexHit;
pub use indexed_document::{IndexedDocument, Metadata, MetadataValue};
pub use populate_outcome::PopulateOutcome;
pub use request::SegmentRequest;
pub use segment::{
    FallbackReason, SearchPath, Segment, SegmentInsight, SegmentPair, SegmentTier,
    SegmentationResponse,
};
