//! # Access Request Records
//!
//! The stored shape of an access request and the unauthenticated
//! submission form it is created from.

use serde::{Deserialize, Serialize};

use custos_core::{AccountId, BadgeNumber, Department, RequestId, Timestamp, Username};
use custos_state::RequestStatus;

/// Raw submission data from the public access-request form.
///
/// Carries unvalidated strings; the controller validates and converts
/// them at `submit()` so a rejected field surfaces as a validation error
/// naming that field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessRequestForm {
    /// Full name of the requester.
    pub full_name: String,
    /// Badge or service identification number.
    pub badge_number: String,
    /// The requester's department.
    pub department: Department,
    /// Office phone extension, if any.
    pub phone_extension: Option<String>,
    /// Desired login username.
    pub requested_username: String,
    /// Justification for requesting access.
    #[serde(default)]
    pub reason: String,
}

/// A stored access request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessRequest {
    /// Unique identifier.
    pub id: RequestId,
    /// Full name of the requester.
    pub full_name: String,
    /// Badge number; at most one pending request per badge.
    pub badge_number: BadgeNumber,
    /// The requester's department.
    pub department: Department,
    /// Office phone extension, if any.
    pub phone_extension: Option<String>,
    /// Desired username; at most one pending request per username.
    pub requested_username: Username,
    /// Justification for requesting access.
    pub reason: String,
    /// Review status.
    pub status: RequestStatus,
    /// When the request was submitted.
    pub requested_at: Timestamp,
    /// When the request was reviewed, once terminal.
    pub reviewed_at: Option<Timestamp>,
    /// The reviewing account, once terminal.
    pub reviewed_by: Option<AccountId>,
    /// Reviewer notes on the decision.
    pub review_notes: Option<String>,
}
