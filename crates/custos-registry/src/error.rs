//! # Custody Error Taxonomy
//!
//! Every failure the registry and ledger can surface. Variants carry the
//! conflicting prior state so a caller can correct and retry; storage
//! internals never leak past the opaque `Storage` variant.

use thiserror::Error;

use custos_core::{Department, EvidenceId};
use custos_gate::Action;
use custos_state::{EvidenceStatus, StatusError};

/// Errors surfaced by the evidence registry and custody ledger.
#[derive(Error, Debug)]
pub enum CustodyError {
    /// Malformed or missing input; recoverable by caller correction.
    #[error("validation error for {field}: {message}")]
    Validation {
        /// The offending field.
        field: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// No evidence item with the given identifier.
    #[error("evidence item {evidence_id} not found")]
    NotFound {
        /// The unknown identifier.
        evidence_id: EvidenceId,
    },

    /// The permission gate denied the action.
    #[error("permission denied for action {action}")]
    Permission {
        /// The denied action kind.
        action: Action,
    },

    /// The requested status transition is not in the allow table.
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition {
        /// Current status.
        from: EvidenceStatus,
        /// Attempted target status.
        to: EvidenceStatus,
    },

    /// The item is in a terminal status; its chain of custody is sealed.
    #[error("evidence is in terminal status {state}; chain of custody is sealed")]
    TerminalState {
        /// The terminal status.
        state: EvidenceStatus,
    },

    /// The claimed origin department disagrees with the current
    /// custodian. Reports the actual custodian so the caller can retry
    /// against real state.
    #[error("item is currently held by {actual}, not {claimed} as claimed")]
    CustodyConflict {
        /// The department actually holding the item.
        actual: Department,
        /// The department the caller claimed.
        claimed: Department,
    },

    /// Deletion refused because the item has custody history.
    #[error("evidence item {evidence_id} has {transfers} custody transfer(s) and cannot be deleted")]
    HistoryRetained {
        /// The item whose history blocks deletion.
        evidence_id: EvidenceId,
        /// Number of ledger entries retained.
        transfers: usize,
    },

    /// Unexpected storage failure; details are logged, not surfaced.
    #[error("internal storage error")]
    Storage(String),
}

impl From<StatusError> for CustodyError {
    fn from(err: StatusError) -> Self {
        match err {
            StatusError::InvalidTransition { from, to } => Self::InvalidTransition { from, to },
            StatusError::TerminalState { state } => Self::TerminalState { state },
        }
    }
}
