//! # Authorization Policy
//!
//! Defines the action kinds, resource attribute shapes, and the rule
//! table itself.
//!
//! ## Rule Matrix
//!
//! | action        | resource        | allowed for                                   |
//! |---------------|-----------------|-----------------------------------------------|
//! | Read          | Evidence        | every active account                          |
//! | Write/Transfer| Evidence        | admin; investigator/analyst in the case dept  |
//! | Delete        | Evidence        | admin                                         |
//! | Read          | Document        | clearance ≥ effective level                   |
//! | Write         | Document        | clearance ≥ effective level, and not `user`   |
//! | Delete        | Document        | admin                                         |
//! | ReviewAccess  | AdmissionQueue  | admin                                         |
//!
//! Effective document level: the confidential flag raises anything below
//! `Restricted` up to `Restricted`. Inactive accounts are denied
//! everything before the table is consulted.

use serde::{Deserialize, Serialize};

use custos_core::{AccessLevel, Actor, Department, Role};

// ─── Action Kinds ────────────────────────────────────────────────────

/// The kinds of operation the gate distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Read a record.
    Read,
    /// Create or update a record.
    Write,
    /// Append a custody transfer.
    Transfer,
    /// Delete a record.
    Delete,
    /// Approve or deny an access request.
    ReviewAccess,
}

impl Action {
    /// Returns the snake_case string code for this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Transfer => "transfer",
            Self::Delete => "delete",
            Self::ReviewAccess => "review_access",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Resource Attributes ─────────────────────────────────────────────

/// The access-control attributes of the resource being acted on.
///
/// The gate never loads resources itself — callers pass the attributes
/// that matter, which keeps the predicate pure and trivially testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Resource {
    /// An evidence item (and its custody ledger), scoped by the
    /// department of the case it belongs to.
    Evidence {
        /// Department owning the case the item belongs to.
        case_department: Department,
    },
    /// A case document.
    Document {
        /// The document's classification level.
        level: AccessLevel,
        /// Whether the document is confidentiality-flagged.
        confidential: bool,
    },
    /// The queue of pending access requests.
    AdmissionQueue,
}

// ─── Predicate ───────────────────────────────────────────────────────

/// The maximum document classification a role may read.
pub fn clearance(role: Role) -> AccessLevel {
    match role {
        Role::Admin => AccessLevel::Classified,
        Role::Investigator => AccessLevel::Restricted,
        Role::Analyst => AccessLevel::Internal,
        Role::User => AccessLevel::Internal,
    }
}

/// Whether `actor` may perform `action` on the resource described by
/// `resource`.
///
/// Deny-by-default: the final arm of the table denies anything not
/// explicitly allowed above it.
pub fn allowed(actor: &Actor, action: Action, resource: &Resource) -> bool {
    if !actor.active {
        return false;
    }
    match (action, resource) {
        (Action::Read, Resource::Evidence { .. }) => true,

        (Action::Write | Action::Transfer, Resource::Evidence { case_department }) => {
            match actor.role {
                Role::Admin => true,
                Role::Investigator | Role::Analyst => actor.department == *case_department,
                Role::User => false,
            }
        }

        (Action::Delete, Resource::Evidence { .. }) => actor.role == Role::Admin,

        (Action::Read, Resource::Document { level, confidential }) => {
            clearance(actor.role) >= effective_level(*level, *confidential)
        }

        (Action::Write, Resource::Document { level, confidential }) => {
            actor.role != Role::User
                && clearance(actor.role) >= effective_level(*level, *confidential)
        }

        (Action::Delete, Resource::Document { .. }) => actor.role == Role::Admin,

        (Action::ReviewAccess, Resource::AdmissionQueue) => actor.role == Role::Admin,

        _ => false,
    }
}

/// The confidential flag raises a document's required clearance to at
/// least `Restricted`.
fn effective_level(level: AccessLevel, confidential: bool) -> AccessLevel {
    if confidential {
        level.max(AccessLevel::Restricted)
    } else {
        level
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
