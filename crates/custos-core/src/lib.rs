//! # custos-core — Foundational Types for the Custos Stack
//!
//! This crate is the bedrock of the Custos evidence custody stack. It defines
//! the type-system primitives shared by every other crate in the workspace;
//! it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `EvidenceId`, `CaseId`,
//!    `TransferId`, `RequestId`, `AccountId`, `EvidenceNumber`, `BadgeNumber`,
//!    `Username` — all newtypes, the string-backed ones with validated
//!    constructors. No bare strings for identifiers.
//!
//! 2. **Single `Department` enum.** One definition, exhaustive `match`
//!    everywhere. Custody chains and access decisions both key off it, so a
//!    second definition anywhere would reintroduce the custodian-mismatch
//!    defect class.
//!
//! 3. **UTC-only timestamps.** The `Timestamp` type enforces UTC with Z
//!    suffix and seconds precision. Custody ordering never depends on it —
//!    ledger entries are ordered by sequence number — but every persisted
//!    record renders the same canonical instant format.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `custos-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod actor;
pub mod department;
pub mod error;
pub mod identity;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use actor::{Actor, Role};
pub use department::{AccessLevel, Department, DEPARTMENT_COUNT};
pub use error::CoreError;
pub use identity::{
    AccountId, BadgeNumber, CaseId, EvidenceId, EvidenceNumber, LabNumber, RequestId, TransferId,
    Username,
};
pub use temporal::Timestamp;
