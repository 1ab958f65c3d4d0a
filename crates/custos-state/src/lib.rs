//! # custos-state — Lifecycle State Machines
//!
//! Implements the state machines of the Custos stack.
//!
//! ## State Machines
//!
//! - **Evidence status** (`evidence.rs`):
//!   `Collected → InAnalysis ⇄ InStorage → Released | Destroyed`.
//!   Transitions are validated against an explicit allow table — an
//!   illegal transition is a lookup miss, not a missed `if` branch.
//!
//! - **Access request review** (`admission.rs`):
//!   `Pending → Approved | Denied`, both terminal.
//!
//! ## Design
//!
//! Both machines are small enough that an enum with a validated
//! `transition` check is the right weight; a typestate encoding would
//! spend five types and five impl blocks to protect two guard
//! conditions. The guard the table cannot express — the first analysis
//! transition requires a recorded custody transfer — is an explicit
//! parameter, so the caller cannot forget it.

pub mod admission;
pub mod evidence;

pub use admission::{RequestStatus, ReviewError};
pub use evidence::{EvidenceStatus, StatusError};
