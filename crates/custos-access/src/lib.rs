//! # custos-access — Access Admission Controller
//!
//! Account provisioning for a system whose users cannot sign themselves
//! up: an unauthenticated requester files an access request, a reviewer
//! with the admission capability approves or denies it, and approval
//! provisions an account whose temporary secret is disclosed to the
//! reviewer exactly once.
//!
//! ## Core Invariants
//!
//! - At most one pending request per badge number and, independently,
//!   per requested username — enforced at intake inside the controller's
//!   critical section, not at review time.
//! - A request is reviewed once; both outcomes are terminal and a second
//!   review fails without side effects.
//! - Approval and provisioning are atomic: if the username is taken at
//!   provisioning time the request stays pending and no account exists.
//! - The plaintext temporary secret appears only in the approval return
//!   value. Storage holds a salted hash; no read path can produce the
//!   plaintext again.

pub mod account;
pub mod controller;
pub mod error;
pub mod issuer;
pub mod request;

pub use account::ProvisionedAccount;
pub use controller::{AdmissionController, ApprovalReceipt};
pub use error::AdmissionError;
pub use issuer::CredentialIssuer;
pub use request::{AccessRequest, AccessRequestForm};
