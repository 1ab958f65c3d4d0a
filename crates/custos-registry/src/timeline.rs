//! # Timeline Sink Seam
//!
//! Case timelines and notifications are delivered by an external
//! collaborator, best-effort. The ledger emits an event describing each
//! committed transfer through this seam; delivery failure never rolls
//! back the append — ledger durability outranks notification
//! durability — and is surfaced to the caller as a warning instead.

use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use custos_core::{CaseId, EvidenceId, Timestamp};

/// Failure to deliver a timeline event.
#[derive(Error, Debug)]
#[error("timeline delivery failed: {0}")]
pub struct SinkError(pub String);

/// Kinds of timeline activity the core emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineEventKind {
    /// A custody handoff was recorded.
    CustodyTransfer,
}

/// A timeline activity describing a core mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// The case the activity belongs to.
    pub case_id: CaseId,
    /// The evidence item involved.
    pub evidence_id: EvidenceId,
    /// Activity kind.
    pub kind: TimelineEventKind,
    /// Short human-readable title.
    pub title: String,
    /// Longer description.
    pub description: String,
    /// Who performed the underlying action.
    pub performed_by: String,
    /// When the underlying action happened.
    pub occurred_at: Timestamp,
}

/// Delivery seam for timeline events.
pub trait TimelineSink: Send + Sync {
    /// Deliver one event. Best-effort; errors are reported, not retried
    /// by the core.
    fn record(&self, event: TimelineEvent) -> Result<(), SinkError>;
}

/// Sink that drops every event. Default for deployments where the
/// timeline collaborator subscribes to the store directly.
#[derive(Debug, Default)]
pub struct NullTimelineSink;

impl TimelineSink for NullTimelineSink {
    fn record(&self, _event: TimelineEvent) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Sink that buffers events in memory. Used in tests and by the
/// single-process server to feed the timeline view.
#[derive(Debug, Default)]
pub struct MemoryTimelineSink {
    events: Mutex<Vec<TimelineEvent>>,
}

impl MemoryTimelineSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn events(&self) -> Vec<TimelineEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl TimelineSink for MemoryTimelineSink {
    fn record(&self, event: TimelineEvent) -> Result<(), SinkError> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
        Ok(())
    }
}
