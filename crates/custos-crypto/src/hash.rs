//! # Salted Secret Hashing
//!
//! Persists temporary secrets as salt + SHA-256(salt ‖ secret). The
//! stored value supports verification only — there is no decode path.
//!
//! ## Serde
//!
//! A `SecretHash` serializes as a single lowercase hex string of the
//! 16-byte salt followed by the 32-byte digest (96 hex characters), so
//! record stores and fixtures handle it as an opaque token.

use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Length of the random salt, in bytes.
pub const SALT_LEN: usize = 16;

/// Length of the SHA-256 digest, in bytes.
pub const DIGEST_LEN: usize = 32;

/// Errors parsing a stored secret hash.
#[derive(Error, Debug)]
pub enum HashError {
    /// The hex encoding was malformed.
    #[error("malformed secret hash: {0}")]
    Malformed(String),
}

/// A salted SHA-256 hash of a temporary secret.
///
/// The only persisted representation of a credential. Equality is not
/// derived — two hashes of the same secret differ by salt, and
/// verification must go through [`SecretHash::verify()`].
#[derive(Clone)]
pub struct SecretHash {
    salt: [u8; SALT_LEN],
    digest: [u8; DIGEST_LEN],
}

impl SecretHash {
    /// Hash a secret under a fresh random salt.
    pub fn derive(secret: &str) -> Self {
        let mut salt = [0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);
        let digest = compute_digest(&salt, secret);
        Self { salt, digest }
    }

    /// Verify a candidate secret against this hash.
    ///
    /// Comparison is constant-time over the digest bytes so verification
    /// latency does not leak how many leading bytes matched.
    pub fn verify(&self, candidate: &str) -> bool {
        let candidate_digest = compute_digest(&self.salt, candidate);
        let mut diff = 0u8;
        for (a, b) in self.digest.iter().zip(candidate_digest.iter()) {
            diff |= a ^ b;
        }
        diff == 0
    }

    /// Render as a lowercase hex string (salt ‖ digest).
    pub fn to_hex(&self) -> String {
        self.salt
            .iter()
            .chain(self.digest.iter())
            .map(|b| format!("{b:02x}"))
            .collect()
    }

    /// Parse from the hex representation produced by [`SecretHash::to_hex()`].
    pub fn from_hex(hex: &str) -> Result<Self, HashError> {
        let expected = (SALT_LEN + DIGEST_LEN) * 2;
        let hex = hex.trim().to_lowercase();
        if hex.len() != expected {
            return Err(HashError::Malformed(format!(
                "secret hash hex must be {expected} chars, got {}",
                hex.len()
            )));
        }
        let bytes = hex_to_bytes(&hex).map_err(HashError::Malformed)?;
        let mut salt = [0u8; SALT_LEN];
        let mut digest = [0u8; DIGEST_LEN];
        salt.copy_from_slice(&bytes[..SALT_LEN]);
        digest.copy_from_slice(&bytes[SALT_LEN..]);
        Ok(Self { salt, digest })
    }
}

impl Serialize for SecretHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for SecretHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for SecretHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix: String = self.digest.iter().take(4).map(|b| format!("{b:02x}")).collect();
        write!(f, "SecretHash({prefix}...)")
    }
}

fn compute_digest(salt: &[u8; SALT_LEN], secret: &str) -> [u8; DIGEST_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(secret.as_bytes());
    let hash = hasher.finalize();
    let mut digest = [0u8; DIGEST_LEN];
    digest.copy_from_slice(&hash);
    digest
}

fn hex_to_bytes(hex: &str) -> Result<Vec<u8>, String> {
    if hex.len() % 2 != 0 {
        return Err("hex string must have even length".to_string());
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| format!("invalid hex at position {i}: {e}"))
        })
        .collect()
}
