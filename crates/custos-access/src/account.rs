//! # Provisioned Account Records
//!
//! The account created by an approved access request. Only the salted
//! hash of the temporary secret is stored; the serialized form is the
//! record-store shape and is never returned over an interface as-is.

use serde::{Deserialize, Serialize};

use custos_core::{AccountId, Department, Role, Timestamp, Username};
use custos_crypto::SecretHash;

/// An account provisioned through the admission workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvisionedAccount {
    /// Unique account identifier.
    pub id: AccountId,
    /// Login username, unique across accounts.
    pub username: Username,
    /// Granted role.
    pub role: Role,
    /// Home department.
    pub department: Department,
    /// Salted hash of the temporary secret.
    pub secret_hash: SecretHash,
    /// When the account was provisioned.
    pub created_at: Timestamp,
}
