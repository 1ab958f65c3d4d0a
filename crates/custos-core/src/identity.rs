//! # Domain Identity Newtypes
//!
//! Newtype wrappers for all domain identifiers in the Custos stack.
//! These prevent accidental identifier confusion — you cannot pass a
//! `CaseId` where an `EvidenceId` is expected, and a badge number can
//! never be used as a username.
//!
//! UUID-backed identifiers are freely mintable; string-backed identifiers
//! (`EvidenceNumber`, `BadgeNumber`, `Username`, `LabNumber`) have
//! validated constructors so that an empty or malformed value cannot
//! enter the system.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

/// Unique identifier for an evidence item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EvidenceId(pub Uuid);

/// Unique identifier for an investigation case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaseId(pub Uuid);

/// Unique identifier for a custody transfer entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransferId(pub Uuid);

/// Unique identifier for an access request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub Uuid);

/// Unique identifier for a provisioned user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(pub Uuid);

macro_rules! uuid_id {
    ($name:ident, $prefix:literal) => {
        impl $name {
            /// Generate a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Access the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, ":{}"), self.0)
            }
        }
    };
}

uuid_id!(EvidenceId, "evidence");
uuid_id!(CaseId, "case");
uuid_id!(TransferId, "transfer");
uuid_id!(RequestId, "request");
uuid_id!(AccountId, "account");

/// Human-readable evidence number (e.g. `2026-0147-003`).
///
/// Unique across the registry and immutable after intake.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EvidenceNumber(String);

impl EvidenceNumber {
    /// Construct a validated evidence number. Rejects empty or
    /// whitespace-only input.
    pub fn new(value: impl Into<String>) -> Result<Self, CoreError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(CoreError::Validation {
                field: "evidence_number",
                message: "must not be empty".to_string(),
            });
        }
        Ok(Self(value.trim().to_string()))
    }

    /// The evidence number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EvidenceNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Secondary lab tracking identifier (e.g. `24/46/123`). Optional on an
/// evidence item; carried for interop with the lab intake ledger.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LabNumber(String);

impl LabNumber {
    /// Construct a validated lab number. Rejects empty input.
    pub fn new(value: impl Into<String>) -> Result<Self, CoreError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(CoreError::Validation {
                field: "lab_number",
                message: "must not be empty".to_string(),
            });
        }
        Ok(Self(value.trim().to_string()))
    }

    /// The lab number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LabNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Badge or service identification number of an officer.
///
/// The admission workflow enforces at most one pending access request per
/// badge number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BadgeNumber(String);

impl BadgeNumber {
    /// Construct a validated badge number. Rejects empty input.
    pub fn new(value: impl Into<String>) -> Result<Self, CoreError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(CoreError::Validation {
                field: "badge_number",
                message: "must not be empty".to_string(),
            });
        }
        Ok(Self(value.trim().to_string()))
    }

    /// The badge number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BadgeNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Login username for a provisioned account.
///
/// Lowercased at construction so uniqueness checks are case-insensitive.
/// Restricted to ASCII alphanumerics plus `.`, `-`, and `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
    /// Maximum accepted username length.
    pub const MAX_LEN: usize = 150;

    /// Construct a validated username.
    pub fn new(value: impl Into<String>) -> Result<Self, CoreError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(CoreError::Validation {
                field: "username",
                message: "must not be empty".to_string(),
            });
        }
        if trimmed.len() > Self::MAX_LEN {
            return Err(CoreError::Validation {
                field: "username",
                message: format!("must be at most {} characters", Self::MAX_LEN),
            });
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        {
            return Err(CoreError::Validation {
                field: "username",
                message: "may contain only letters, digits, '.', '-', and '_'".to_string(),
            });
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    /// The username as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
