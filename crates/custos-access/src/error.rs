//! # Admission Error Taxonomy
//!
//! Failures of the admission workflow. Conflict variants name the value
//! and prior state that caused the rejection so a requester or reviewer
//! can act on them.

use thiserror::Error;

use custos_core::{RequestId, Username};
use custos_state::{RequestStatus, ReviewError};

/// Errors surfaced by the access admission controller.
#[derive(Error, Debug)]
pub enum AdmissionError {
    /// Malformed or missing input; recoverable by caller correction.
    #[error("validation error for {field}: {message}")]
    Validation {
        /// The offending field.
        field: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// A pending request already holds this badge number or username.
    #[error("a pending access request already exists for {field} {value:?}")]
    DuplicatePending {
        /// The colliding field.
        field: &'static str,
        /// The colliding value.
        value: String,
    },

    /// The requested username already belongs to a provisioned account.
    #[error("username {username} is already taken")]
    UsernameTaken {
        /// The taken username.
        username: Username,
    },

    /// No access request with the given identifier.
    #[error("access request {request_id} not found")]
    NotFound {
        /// The unknown identifier.
        request_id: RequestId,
    },

    /// The request was already reviewed; terminal states are immutable.
    #[error("request already reviewed: status is {status}")]
    AlreadyReviewed {
        /// The terminal status that already stands.
        status: RequestStatus,
    },

    /// The reviewer lacks the admission capability.
    #[error("reviewer lacks admission authority")]
    Permission,

    /// Unexpected storage failure; details are logged, not surfaced.
    #[error("internal storage error")]
    Storage(String),
}

impl From<ReviewError> for AdmissionError {
    fn from(err: ReviewError) -> Self {
        match err {
            ReviewError::AlreadyReviewed { status } => Self::AlreadyReviewed { status },
        }
    }
}
