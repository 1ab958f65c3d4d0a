//! # Department, Role, and Access-Level Taxonomies
//!
//! Defines the `Department` enum with all organizational units — the ONE
//! definition used across the entire stack. Custody chains record
//! departments as custodians and the permission gate scopes write access
//! by them, so every `match` must be exhaustive: adding a department
//! forces every consumer to handle it at compile time.
//!
//! Also defines `Role` (the identity-store role taxonomy) and
//! `AccessLevel` (the document classification ladder consumed by the
//! permission gate).

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CoreError;

/// All organizational units that can hold custody of evidence.
///
/// Each department represents a distinct unit with its own intake desk;
/// the custody ledger records handoffs between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Department {
    /// Surveillance unit.
    Sur,
    /// Armed robbery unit.
    Ar,
    /// Juvenile and vice unit.
    Jzz,
    /// Serious crimes unit.
    ZwaCri,
    /// Fraud investigations.
    Fraude,
    /// Environmental and miscellaneous enforcement.
    Umm,
    /// Alpha response team.
    Alpha,
    /// Customs enforcement.
    Douane,
    /// Immigration and naturalization.
    Ind,
    /// Traffic enforcement.
    Verkeer,
    /// Coast guard liaison.
    Kustwacht,
    /// Pelican task force.
    Pelican,
    /// Internal bureau services (central evidence storage).
    Ibs,
    /// Any unit not in the fixed taxonomy.
    Other,
}

/// Total number of departments. Used for compile-time assertions.
pub const DEPARTMENT_COUNT: usize = 14;

impl Department {
    /// Returns all departments in canonical order.
    pub fn all() -> &'static [Department] {
        &[
            Self::Sur,
            Self::Ar,
            Self::Jzz,
            Self::ZwaCri,
            Self::Fraude,
            Self::Umm,
            Self::Alpha,
            Self::Douane,
            Self::Ind,
            Self::Verkeer,
            Self::Kustwacht,
            Self::Pelican,
            Self::Ibs,
            Self::Other,
        ]
    }

    /// Returns the snake_case string code for this department.
    ///
    /// This must match the serde serialization format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sur => "sur",
            Self::Ar => "ar",
            Self::Jzz => "jzz",
            Self::ZwaCri => "zwa_cri",
            Self::Fraude => "fraude",
            Self::Umm => "umm",
            Self::Alpha => "alpha",
            Self::Douane => "douane",
            Self::Ind => "ind",
            Self::Verkeer => "verkeer",
            Self::Kustwacht => "kustwacht",
            Self::Pelican => "pelican",
            Self::Ibs => "ibs",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Department {
    type Err = CoreError;

    /// Parse a department from its snake_case code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sur" => Ok(Self::Sur),
            "ar" => Ok(Self::Ar),
            "jzz" => Ok(Self::Jzz),
            "zwa_cri" => Ok(Self::ZwaCri),
            "fraude" => Ok(Self::Fraude),
            "umm" => Ok(Self::Umm),
            "alpha" => Ok(Self::Alpha),
            "douane" => Ok(Self::Douane),
            "ind" => Ok(Self::Ind),
            "verkeer" => Ok(Self::Verkeer),
            "kustwacht" => Ok(Self::Kustwacht),
            "pelican" => Ok(Self::Pelican),
            "ibs" => Ok(Self::Ibs),
            "other" => Ok(Self::Other),
            other => Err(CoreError::UnknownCode {
                kind: "department",
                code: other.to_string(),
            }),
        }
    }
}

/// Classification ladder for case documents.
///
/// The permission gate compares a reader's role against a document's
/// level; the ordering of the variants is the ordering of the ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    /// Readable by anyone with an account.
    Public,
    /// Readable inside the organization.
    Internal,
    /// Readable by investigators and above.
    Restricted,
    /// Readable by administrators only.
    Classified,
}

impl AccessLevel {
    /// Returns the snake_case string code for this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Internal => "internal",
            Self::Restricted => "restricted",
            Self::Classified => "classified",
        }
    }
}

impl std::fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
