//! # Error Types — Core Construction Failures
//!
//! Defines the error type for failures constructing core primitives:
//! malformed identifiers, rejected timestamps, unknown enum codes. All
//! errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! Domain-level failures (custody conflicts, admission conflicts, gate
//! denials) live with their state machines and services in the crates
//! that own them.

use thiserror::Error;

/// Errors raised while constructing or parsing core primitives.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A field failed validation at construction time.
    #[error("validation error for {field}: {message}")]
    Validation {
        /// The field that failed.
        field: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// A string code did not name a known enum variant.
    #[error("unknown {kind} code: {code:?}")]
    UnknownCode {
        /// The taxonomy being parsed (e.g. "department").
        kind: &'static str,
        /// The offending input.
        code: String,
    },

    /// A timestamp failed parsing or violated the UTC-only policy.
    #[error("timestamp error: {0}")]
    Timestamp(String),
}
