//! # custos-registry — Evidence Registry and Custody Ledger
//!
//! The authoritative record of evidence items and the append-only
//! chain-of-custody ledger attached to each of them.
//!
//! ## Core Invariants
//!
//! - An item's `current_department` always equals the `to_department` of
//!   its most recent custody entry, or its origin department while the
//!   ledger is empty. Only [`registry::EvidenceRegistry::append_transfer()`]
//!   writes it, inside the same critical section as the append.
//! - Entry *n*'s `from_department` equals entry *n-1*'s `to_department`
//!   for every chain. A transfer whose claimed origin disagrees with the
//!   current custodian is rejected with the actual custodian named.
//! - Ledger entries are immutable: there is no update or delete
//!   operation on them, and ordering is by per-item sequence number so
//!   clock skew between departments cannot reorder a chain.
//! - An item with custody history cannot be deleted.
//!
//! ## Collaborator Seams
//!
//! Case records and timeline/notification delivery belong to external
//! collaborators; [`cases::CaseDirectory`] and [`timeline::TimelineSink`]
//! are the seams the registry consumes them through. A timeline failure
//! never rolls back a committed append — it is surfaced as a warning on
//! the receipt.

pub mod cases;
pub mod error;
pub mod item;
pub mod registry;
pub mod timeline;
pub mod transfer;

pub use cases::{CaseDirectory, InMemoryCaseDirectory};
pub use error::CustodyError;
pub use item::{DeviceType, EvidenceIntake, EvidenceItem};
pub use registry::{EvidenceRegistry, TransferOrder, TransferReceipt};
pub use timeline::{MemoryTimelineSink, NullTimelineSink, SinkError, TimelineEvent, TimelineEventKind, TimelineSink};
pub use transfer::CustodyTransfer;
