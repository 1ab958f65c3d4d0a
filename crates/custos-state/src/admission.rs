//! # Access Request Review State Machine
//!
//! Models the review lifecycle of an access request:
//!
//! ```text
//! (submission) ──▶ Pending ──▶ Approved   (terminal)
//!                     │
//!                     └──────▶ Denied     (terminal)
//! ```
//!
//! A request is reviewed exactly once. Both outcomes are terminal — a
//! second review attempt is rejected with the status that already stands,
//! so a double-submitted approval cannot provision a second account.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ─── Request Status ──────────────────────────────────────────────────

/// The review status of an access request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Submitted, awaiting review.
    Pending,
    /// Approved; an account was provisioned.
    Approved,
    /// Denied; no account exists.
    Denied,
}

impl RequestStatus {
    /// Whether this status is terminal (review already happened).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Denied)
    }

    /// Validate that a review decision may be applied to a request in
    /// this status.
    ///
    /// # Errors
    ///
    /// [`ReviewError::AlreadyReviewed`] if the request is terminal.
    pub fn validate_review(&self) -> Result<(), ReviewError> {
        if self.is_terminal() {
            return Err(ReviewError::AlreadyReviewed { status: *self });
        }
        Ok(())
    }

    /// Returns the snake_case string code for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Denied => "denied",
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Denied => "DENIED",
        };
        f.write_str(s)
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors that can occur applying a review decision.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReviewError {
    /// The request has already been reviewed.
    #[error("request already reviewed: status is {status}")]
    AlreadyReviewed {
        /// The terminal status that already stands.
        status: RequestStatus,
    },
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_accepts_review() {
        assert!(RequestStatus::Pending.validate_review().is_ok());
    }

    #[test]
    fn test_terminal_rejects_review() {
        for status in [RequestStatus::Approved, RequestStatus::Denied] {
            let err = status.validate_review().unwrap_err();
            assert_eq!(err, ReviewError::AlreadyReviewed { status });
        }
    }

    #[test]
    fn test_is_terminal() {
        assert!(!RequestStatus::Pending.is_terminal());
        assert!(RequestStatus::Approved.is_terminal());
        assert!(RequestStatus::Denied.is_terminal());
    }

    #[test]
    fn test_display() {
        assert_eq!(RequestStatus::Pending.to_string(), "PENDING");
        assert_eq!(RequestStatus::Approved.to_string(), "APPROVED");
        assert_eq!(RequestStatus::Denied.to_string(), "DENIED");
    }

    #[test]
    fn test_serde_roundtrip() {
        for status in [RequestStatus::Pending, RequestStatus::Approved, RequestStatus::Denied] {
            let json = serde_json::to_string(&status).unwrap();
            let parsed: RequestStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(status, parsed);
        }
    }
}
