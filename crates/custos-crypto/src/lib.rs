//! # custos-crypto — Credential Primitives
//!
//! Cryptographic support for the credential issuer: temporary-secret
//! generation from the operating system CSPRNG and salted SHA-256
//! hashing for at-rest verification.
//!
//! ## Security Invariants
//!
//! - The plaintext secret exists only inside [`PlaintextSecret`], which
//!   redacts `Debug` and does not implement `Serialize` — it cannot be
//!   accidentally logged or persisted through a derive.
//! - Only [`SecretHash`] (salt + digest) has a storage lifecycle. There
//!   is no API that recovers a plaintext from a hash; a lost secret is
//!   reset, never recovered.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod hash;
pub mod secret;

pub use hash::{HashError, SecretHash};
pub use secret::{generate_secret, PlaintextSecret, SECRET_LEN};
