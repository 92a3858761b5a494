//! Record every degradation event with its recovery status.
//!
//! Repeats of an active (component, failure) pair are folded into the
//! existing entry, and the tracker keeps at most [`MAX_TRACKED`] entries,
//! dropping the oldest first.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use audience_core::models::DegradationEvent;

/// Upper bound on distinct tracked degradations.
pub const MAX_TRACKED: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryStatus {
    /// Still in degraded mode.
    Active,
    /// Back to normal operation.
    Recovered,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedDegradation {
    /// First occurrence.
    pub event: DegradationEvent,
    pub occurrences: u64,
    pub last_seen: DateTime<Utc>,
    pub recovery_status: RecoveryStatus,
    pub recovered_at: Option<DateTime<Utc>>,
}

/// Degradations seen by an engine, oldest first.
#[derive(Debug, Clone, Default)]
pub struct DegradationTracker {
    events: VecDeque<TrackedDegradation>,
}

impl DegradationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: DegradationEvent) {
        if let Some(tracked) = self.events.iter_mut().find(|t| {
            t.recovery_status == RecoveryStatus::Active
                && t.event.component == event.component
                && t.event.failure == event.failure
        }) {
            tracked.occurrences += 1;
            tracked.last_seen = event.timestamp;
            debug!(
                component = %event.component,
                occurrences = tracked.occurrences,
                "degradation repeated"
            );
            return;
        }

        warn!(
            component = %event.component,
            failure = %event.failure,
            fallback = %event.fallback_used,
            "degradation recorded"
        );
        if self.events.len() == MAX_TRACKED {
            self.events.pop_front();
        }
        self.events.push_back(TrackedDegradation {
            last_seen: event.timestamp,
            event,
            occurrences: 1,
            recovery_status: RecoveryStatus::Active,
            recovered_at: None,
        });
    }

    /// Mark every active degradation of `component` as recovered.
    /// Returns how many entries changed.
    pub fn mark_recovered(&mut self, component: &str) -> usize {
        let now = Utc::now();
        let mut recovered = 0;
        for tracked in self.events.iter_mut().filter(|t| {
            t.event.component == component && t.recovery_status == RecoveryStatus::Active
        }) {
            tracked.recovery_status = RecoveryStatus::Recovered;
            tracked.recovered_at = Some(now);
            recovered += 1;
        }
        if recovered > 0 {
            info!(component, "component recovered");
        }
        recovered
    }

    pub fn events(&self) -> impl Iterator<Item = &TrackedDegradation> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.events
            .iter()
            .filter(|t| t.recovery_status == RecoveryStatus::Active)
            .count()
    }

    /// Whether `component` has an unrecovered degradation.
    pub fn is_degraded(&self, component: &str) -> bool {
        self.events
            .iter()
            .any(|t| t.event.component == component && t.recovery_status == RecoveryStatus::Active)
    }

    /// Remove and return the first occurrence of every tracked degradation.
    pub fn drain(&mut self) -> Vec<DegradationEvent> {
        self.events.drain(..).map(|t| t.event).collect()
    }
}
