//! # custos-gate — Permission Gate
//!
//! The authorization predicate consulted before every mutating operation
//! on the evidence registry and custody ledger, and before access to
//! confidentiality-flagged documents.
//!
//! ## Design
//!
//! - **Pure and stateless.** [`allowed()`] reads its three arguments and
//!   nothing else. It never logs, notifies, or mutates — callers decide
//!   what to do with a denial.
//! - **Deny-by-default.** The rule table enumerates explicit allows; the
//!   final match arm denies. Absence of a rule is a denial, never an
//!   implicit grant.
//! - **Explicit capability for admission review.** Approving or denying
//!   access requests is `Action::ReviewAccess` on
//!   [`Resource::AdmissionQueue`] — a rule like any other, not an
//!   ambient staff flag.

pub mod policy;

pub use policy::{allowed, clearance, Action, Resource};
