//! # Credential Issuer
//!
//! Generates the temporary secret and assembles the account record at
//! approval time. Stateless — the controller owns uniqueness and
//! persistence; the issuer owns the generate/hash/return-once shape.

use custos_core::{AccountId, Department, Role, Timestamp, Username};
use custos_crypto::{generate_secret, PlaintextSecret, SecretHash};

use crate::account::ProvisionedAccount;

/// Builds provisioned accounts with one-time temporary secrets.
#[derive(Debug, Default)]
pub struct CredentialIssuer;

impl CredentialIssuer {
    /// Create an issuer.
    pub fn new() -> Self {
        Self
    }

    /// Issue an account for `username`.
    ///
    /// Generates a fresh temporary secret, persists only its salted
    /// hash in the account record, and hands the plaintext back for the
    /// single immediate disclosure. The plaintext is never logged here
    /// or anywhere downstream — losing it means resetting the secret,
    /// not recovering it.
    pub fn issue(
        &self,
        username: &Username,
        role: Role,
        department: Department,
    ) -> (ProvisionedAccount, PlaintextSecret) {
        let secret = generate_secret();
        let account = ProvisionedAccount {
            id: AccountId::new(),
            username: username.clone(),
            role,
            department,
            secret_hash: SecretHash::derive(secret.expose()),
            created_at: Timestamp::now(),
        };
        tracing::info!(username = %username, role = %role, "provisioned account");
        (account, secret)
    }
}
