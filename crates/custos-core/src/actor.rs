//! # Actor — Caller Identity Snapshot
//!
//! The identity and role store is an external collaborator; this module
//! defines the snapshot of a caller that it hands to the core on every
//! request. The permission gate consumes it as a pure value — the core
//! never authenticates, it only authorizes.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::department::Department;
use crate::error::CoreError;
use crate::identity::AccountId;

/// Role taxonomy exposed by the identity store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// System administrator.
    Admin,
    /// Prosecutor / lead investigator.
    Investigator,
    /// Forensic analyst.
    Analyst,
    /// Regular account with read-mostly access.
    User,
}

impl Role {
    /// Returns the snake_case string code for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Investigator => "investigator",
            Self::Analyst => "analyst",
            Self::User => "user",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "investigator" => Ok(Self::Investigator),
            "analyst" => Ok(Self::Analyst),
            "user" => Ok(Self::User),
            other => Err(CoreError::UnknownCode {
                kind: "role",
                code: other.to_string(),
            }),
        }
    }
}

/// Snapshot of an authenticated caller, as supplied by the identity store.
///
/// Deactivated accounts keep their snapshot shape but are denied every
/// action by the gate — `active` is part of the authorization input, not
/// a reason to fail authentication upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The caller's account identifier.
    pub account_id: AccountId,
    /// Display name, carried into custody records as the acting party.
    pub display_name: String,
    /// The caller's role.
    pub role: Role,
    /// The caller's home department.
    pub department: Department,
    /// Whether the account is currently active.
    pub active: bool,
}

impl Actor {
    /// Construct an active actor snapshot.
    pub fn new(
        account_id: AccountId,
        display_name: impl Into<String>,
        role: Role,
        department: Department,
    ) -> Self {
        Self {
            account_id,
            display_name: display_name.into(),
            role,
            department,
            active: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrip() {
        for role in [Role::Admin, Role::Investigator, Role::Analyst, Role::User] {
            let parsed: Role = role.as_str().parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_role_from_str_invalid() {
        assert!("superuser".parse::<Role>().is_err());
        assert!("Admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_actor_new_is_active() {
        let actor = Actor::new(AccountId::new(), "R. Veldkamp", Role::Analyst, Department::Ibs);
        assert!(actor.active);
        assert_eq!(actor.role, Role::Analyst);
    }
}
