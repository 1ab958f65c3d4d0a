//! # Evidence Status State Machine
//!
//! Models the lifecycle of an evidence item from intake to disposal.
//!
//! ## States
//!
//! ```text
//! Collected ──▶ InAnalysis ⇄ InStorage
//!                   │            │
//!                   ├──▶ Released ◀──┤   (terminal)
//!                   └──▶ Destroyed ◀─┘   (terminal)
//! ```
//!
//! ## Allowed Transitions
//!
//! - `Collected → InAnalysis` — only once at least one custody transfer
//!   has moved the item to an analysis-capable department.
//! - `InAnalysis ⇄ InStorage` — free round-trips for re-examination.
//! - `{InAnalysis, InStorage} → Released | Destroyed` — terminal; the
//!   chain of custody is sealed and all further status transitions and
//!   custody transfers are rejected.
//!
//! The `damages` flag on an item is orthogonal metadata, never a state
//! in this machine.
//!
//! ## Design
//!
//! The allow table is data (`ALLOWED`), not control flow. Checking a
//! transition is a lookup; anything absent from the table is invalid.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ─── Evidence Status ─────────────────────────────────────────────────

/// The lifecycle status of an evidence item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceStatus {
    /// Collected in the field, not yet under analysis.
    Collected,
    /// Under active forensic analysis.
    InAnalysis,
    /// Held in evidence storage between examinations.
    InStorage,
    /// Returned to its owner or handed to the court (terminal).
    Released,
    /// Destroyed under a disposal order (terminal).
    Destroyed,
}

/// The explicit transition table: every legal `(from, to)` pair.
///
/// A pair absent from this table is an invalid transition — there is no
/// other code path that can legalize one.
const ALLOWED: &[(EvidenceStatus, EvidenceStatus)] = &[
    (EvidenceStatus::Collected, EvidenceStatus::InAnalysis),
    (EvidenceStatus::InAnalysis, EvidenceStatus::InStorage),
    (EvidenceStatus::InStorage, EvidenceStatus::InAnalysis),
    (EvidenceStatus::InAnalysis, EvidenceStatus::Released),
    (EvidenceStatus::InAnalysis, EvidenceStatus::Destroyed),
    (EvidenceStatus::InStorage, EvidenceStatus::Released),
    (EvidenceStatus::InStorage, EvidenceStatus::Destroyed),
];

impl EvidenceStatus {
    /// Whether this status is terminal (chain of custody sealed).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Released | Self::Destroyed)
    }

    /// Validate a transition from `self` to `to`.
    ///
    /// `has_transfers` reports whether the item's custody ledger is
    /// non-empty; the `Collected → InAnalysis` edge additionally requires
    /// it, since analysis implies the item has physically moved to an
    /// analysis-capable department.
    ///
    /// # Errors
    ///
    /// - [`StatusError::TerminalState`] if `self` is terminal.
    /// - [`StatusError::InvalidTransition`] if `(self, to)` is not in the
    ///   allow table, or the first-transfer guard fails.
    pub fn validate_transition(&self, to: EvidenceStatus, has_transfers: bool) -> Result<(), StatusError> {
        if self.is_terminal() {
            return Err(StatusError::TerminalState { state: *self });
        }
        if !ALLOWED.contains(&(*self, to)) {
            return Err(StatusError::InvalidTransition { from: *self, to });
        }
        if *self == Self::Collected && to == Self::InAnalysis && !has_transfers {
            return Err(StatusError::InvalidTransition { from: *self, to });
        }
        Ok(())
    }

    /// Returns the snake_case string code for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Collected => "collected",
            Self::InAnalysis => "in_analysis",
            Self::InStorage => "in_storage",
            Self::Released => "released",
            Self::Destroyed => "destroyed",
        }
    }
}

impl std::fmt::Display for EvidenceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Collected => "COLLECTED",
            Self::InAnalysis => "IN_ANALYSIS",
            Self::InStorage => "IN_STORAGE",
            Self::Released => "RELEASED",
            Self::Destroyed => "DESTROYED",
        };
        f.write_str(s)
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors that can occur during evidence status transitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatusError {
    /// Attempted transition is not in the allow table.
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition {
        /// Current status.
        from: EvidenceStatus,
        /// Attempted target status.
        to: EvidenceStatus,
    },

    /// The item is in a terminal status; the chain of custody is sealed.
    #[error("evidence is in terminal status {state}; chain of custody is sealed")]
    TerminalState {
        /// The terminal status.
        state: EvidenceStatus,
    },
}

// ─── Tests ───────────────────────────────────────────────────────────
