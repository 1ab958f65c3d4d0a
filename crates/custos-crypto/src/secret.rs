//! # Temporary Secret Generation
//!
//! Generates the single-use temporary secret disclosed to a reviewer at
//! approval time. Policy: 12 characters, guaranteed to mix uppercase,
//! lowercase, digit, and symbol classes, drawn from the operating system
//! CSPRNG.
//!
//! ## Security Invariant
//!
//! The plaintext never leaves the [`PlaintextSecret`] wrapper except
//! through the explicit [`PlaintextSecret::expose()`] call. The wrapper
//! redacts `Debug` and implements neither `Serialize` nor `Display`, so
//! no derive, log macro, or response body can emit it by accident.

use rand::rngs::OsRng;
use rand::Rng;

/// Length of a generated temporary secret, in characters.
pub const SECRET_LEN: usize = 12;

const UPPER: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";
const LOWER: &[u8] = b"abcdefghjkmnpqrstuvwxyz";
const DIGITS: &[u8] = b"23456789";
const SYMBOLS: &[u8] = b"!@#$%^&*-_=+?";

/// A plaintext temporary secret, held only in memory.
///
/// Returned to the single immediate caller of the credential issuer and
/// dropped after disclosure. Intentionally not `Clone`.
pub struct PlaintextSecret(String);

impl PlaintextSecret {
    /// Expose the secret for one-time disclosure to the reviewer.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for PlaintextSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PlaintextSecret(<redacted>)")
    }
}

/// Generate a temporary secret from the OS CSPRNG.
///
/// The first four characters are drawn one from each character class so
/// that every class is represented, the remainder uniformly from the
/// union, and the result is shuffled so class positions are not
/// predictable.
pub fn generate_secret() -> PlaintextSecret {
    let mut rng = OsRng;
    let mut chars: Vec<u8> = Vec::with_capacity(SECRET_LEN);

    for class in [UPPER, LOWER, DIGITS, SYMBOLS] {
        chars.push(class[rng.gen_range(0..class.len())]);
    }

    let union: Vec<u8> = [UPPER, LOWER, DIGITS, SYMBOLS].concat();
    while chars.len() < SECRET_LEN {
        chars.push(union[rng.gen_range(0..union.len())]);
    }

    // Fisher-Yates, CSPRNG-driven.
    for i in (1..chars.len()).rev() {
        let j = rng.gen_range(0..=i);
        chars.swap(i, j);
    }

    // All class alphabets are ASCII, so this cannot fail.
    PlaintextSecret(String::from_utf8_lossy(&chars).into_owned())
}
