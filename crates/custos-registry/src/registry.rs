//! # Evidence Registry Service
//!
//! Intake, status lifecycle, deletion, and the append-only custody
//! ledger, all behind one service type.
//!
//! ## Transaction Boundary
//!
//! The vault mutex is the transaction boundary. A custody append
//! validates the chain, writes the new entry, and updates the item's
//! `current_department` projection inside one critical section — both
//! happen or neither does, and concurrent appends on the same item are
//! serialized. A writer that loses the race re-validates against the
//! newly appended custodian and fails with a custody conflict naming it,
//! never by silently overwriting.
//!
//! The timeline side-effect runs after the critical section: a committed
//! append is never rolled back because a collaborator was unreachable.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use custos_core::{
    Actor, Department, EvidenceId, EvidenceNumber, LabNumber, Timestamp, TransferId,
};
use custos_gate::{allowed, Action, Resource};
use custos_state::EvidenceStatus;

use crate::cases::CaseDirectory;
use crate::error::CustodyError;
use crate::item::{EvidenceIntake, EvidenceItem};
use crate::timeline::{TimelineEvent, TimelineEventKind, TimelineSink};
use crate::transfer::CustodyTransfer;

// ─── Inputs and Outputs ──────────────────────────────────────────────

/// A custody handoff to record.
#[derive(Debug, Clone)]
pub struct TransferOrder {
    /// The department receiving the item.
    pub to_department: Department,
    /// Name of the person physically performing the handoff.
    pub transferred_by: String,
    /// The origin the caller believes the item is leaving. When present
    /// it must match the item's current custodian; when absent the
    /// current custodian is used as-is.
    pub claimed_from: Option<Department>,
    /// Free-text notes on the handoff.
    pub notes: Option<String>,
}

/// Result of a committed custody append.
#[derive(Debug)]
pub struct TransferReceipt {
    /// The appended ledger entry.
    pub transfer: CustodyTransfer,
    /// Set when the timeline collaborator failed to accept the event.
    /// The append itself is durable regardless.
    pub timeline_warning: Option<String>,
}

// ─── Vault ───────────────────────────────────────────────────────────

struct VaultRecord {
    item: EvidenceItem,
    ledger: Vec<CustodyTransfer>,
}

#[derive(Default)]
struct Vault {
    records: HashMap<EvidenceId, VaultRecord>,
    /// Uniqueness index: evidence number -> item.
    numbers: HashMap<String, EvidenceId>,
}

// ─── Registry ────────────────────────────────────────────────────────

/// The authoritative evidence record store and custody ledger.
pub struct EvidenceRegistry {
    cases: Arc<dyn CaseDirectory>,
    timeline: Arc<dyn TimelineSink>,
    vault: Mutex<Vault>,
}

impl EvidenceRegistry {
    /// Create a registry over the given collaborators.
    pub fn new(cases: Arc<dyn CaseDirectory>, timeline: Arc<dyn TimelineSink>) -> Self {
        Self {
            cases,
            timeline,
            vault: Mutex::new(Vault::default()),
        }
    }

    /// Register a new evidence item.
    ///
    /// The ledger starts empty and `current_department` starts at the
    /// collecting department.
    ///
    /// # Errors
    ///
    /// - `Validation` if the case is unknown, the evidence number is
    ///   empty or already in use, or the item name is missing.
    /// - `Permission` if the gate denies the write.
    pub fn create(&self, intake: EvidenceIntake, actor: &Actor) -> Result<EvidenceItem, CustodyError> {
        let case_department =
            self.cases
                .department(&intake.case_id)
                .ok_or_else(|| CustodyError::Validation {
                    field: "case_id",
                    message: format!("unknown case {}", intake.case_id),
                })?;
        authorize(actor, Action::Write, case_department)?;

        if intake.item_name.trim().is_empty() {
            return Err(CustodyError::Validation {
                field: "item_name",
                message: "must not be empty".to_string(),
            });
        }
        let evidence_number = EvidenceNumber::new(&intake.evidence_number).map_err(|e| {
            CustodyError::Validation {
                field: "evidence_number",
                message: e.to_string(),
            }
        })?;
        let lab_number = match &intake.lab_number {
            Some(raw) => Some(LabNumber::new(raw).map_err(|e| CustodyError::Validation {
                field: "lab_number",
                message: e.to_string(),
            })?),
            None => None,
        };

        let mut vault = self.lock_vault();
        if vault.numbers.contains_key(evidence_number.as_str()) {
            return Err(CustodyError::Validation {
                field: "evidence_number",
                message: format!("{evidence_number} is already in use"),
            });
        }

        let now = Timestamp::now();
        let item = EvidenceItem {
            id: EvidenceId::new(),
            evidence_number: evidence_number.clone(),
            lab_number,
            case_id: intake.case_id,
            case_department,
            device_type: intake.device_type,
            item_name: intake.item_name.trim().to_string(),
            description: intake.description,
            brand: intake.brand,
            model: intake.model,
            serial_number: intake.serial_number,
            identifying_numbers: intake.identifying_numbers,
            status: EvidenceStatus::Collected,
            damages: false,
            damage_description: None,
            origin_department: intake.origin_department,
            current_department: intake.origin_department,
            collected_by: intake.collected_by,
            created_at: now,
            updated_at: now,
        };
        vault
            .numbers
            .insert(evidence_number.as_str().to_string(), item.id);
        vault.records.insert(
            item.id,
            VaultRecord {
                item: item.clone(),
                ledger: Vec::new(),
            },
        );
        Ok(item)
    }

    /// Fetch a snapshot of an item.
    pub fn get(&self, evidence_id: EvidenceId) -> Result<EvidenceItem, CustodyError> {
        let vault = self.lock_vault();
        vault
            .records
            .get(&evidence_id)
            .map(|r| r.item.clone())
            .ok_or(CustodyError::NotFound { evidence_id })
    }

    /// Apply a status transition.
    ///
    /// # Errors
    ///
    /// `NotFound`, `Permission`, `InvalidTransition`, or `TerminalState`.
    pub fn update_status(
        &self,
        evidence_id: EvidenceId,
        new_status: EvidenceStatus,
        actor: &Actor,
    ) -> Result<EvidenceItem, CustodyError> {
        let mut vault = self.lock_vault();
        let record = vault
            .records
            .get_mut(&evidence_id)
            .ok_or(CustodyError::NotFound { evidence_id })?;
        authorize(actor, Action::Write, record.item.case_department)?;

        record
            .item
            .status
            .validate_transition(new_status, !record.ledger.is_empty())?;
        record.item.status = new_status;
        record.item.updated_at = Timestamp::now();
        Ok(record.item.clone())
    }

    /// Set or clear the damage flag.
    ///
    /// Audit-only metadata: allowed in every status, including terminal
    /// ones — a damage observation made after release still belongs in
    /// the record.
    pub fn set_damaged(
        &self,
        evidence_id: EvidenceId,
        damaged: bool,
        description: Option<String>,
        actor: &Actor,
    ) -> Result<EvidenceItem, CustodyError> {
        let mut vault = self.lock_vault();
        let record = vault
            .records
            .get_mut(&evidence_id)
            .ok_or(CustodyError::NotFound { evidence_id })?;
        authorize(actor, Action::Write, record.item.case_department)?;

        record.item.damages = damaged;
        record.item.damage_description = if damaged { description } else { None };
        record.item.updated_at = Timestamp::now();
        Ok(record.item.clone())
    }

    /// Delete an item that was created in error.
    ///
    /// # Errors
    ///
    /// `HistoryRetained` if the item has any custody transfers — chained
    /// evidence is never physically deleted.
    pub fn delete(&self, evidence_id: EvidenceId, actor: &Actor) -> Result<(), CustodyError> {
        let mut vault = self.lock_vault();
        let record = vault
            .records
            .get(&evidence_id)
            .ok_or(CustodyError::NotFound { evidence_id })?;
        authorize(actor, Action::Delete, record.item.case_department)?;

        if !record.ledger.is_empty() {
            return Err(CustodyError::HistoryRetained {
                evidence_id,
                transfers: record.ledger.len(),
            });
        }
        let number = record.item.evidence_number.as_str().to_string();
        vault.records.remove(&evidence_id);
        vault.numbers.remove(&number);
        Ok(())
    }

    /// Append a custody transfer.
    ///
    /// Validation, the append, and the `current_department` update all
    /// happen inside one critical section. The timeline event is emitted
    /// afterwards; its failure surfaces only as a warning on the receipt.
    ///
    /// # Errors
    ///
    /// `NotFound`, `Permission`, `TerminalState`, `CustodyConflict`, or
    /// `Validation` (handoff to the department already holding the item).
    pub fn append_transfer(
        &self,
        evidence_id: EvidenceId,
        order: TransferOrder,
        actor: &Actor,
    ) -> Result<TransferReceipt, CustodyError> {
        let (transfer, event) = {
            let mut vault = self.lock_vault();
            let record = vault
                .records
                .get_mut(&evidence_id)
                .ok_or(CustodyError::NotFound { evidence_id })?;
            authorize(actor, Action::Transfer, record.item.case_department)?;

            if record.item.status.is_terminal() {
                return Err(CustodyError::TerminalState {
                    state: record.item.status,
                });
            }
            let expected = record.item.current_department;
            if let Some(claimed) = order.claimed_from {
                if claimed != expected {
                    return Err(CustodyError::CustodyConflict {
                        actual: expected,
                        claimed,
                    });
                }
            }
            if order.to_department == expected {
                return Err(CustodyError::Validation {
                    field: "to_department",
                    message: format!("item is already held by {expected}"),
                });
            }

            let transfer = CustodyTransfer {
                id: TransferId::new(),
                evidence_id,
                seq: record.ledger.len() as u64,
                from_department: expected,
                to_department: order.to_department,
                transferred_by: order.transferred_by,
                recorded_by: actor.account_id,
                occurred_at: Timestamp::now(),
                notes: order.notes,
            };
            record.ledger.push(transfer.clone());
            record.item.current_department = order.to_department;
            record.item.updated_at = transfer.occurred_at;

            let event = TimelineEvent {
                case_id: record.item.case_id,
                evidence_id,
                kind: TimelineEventKind::CustodyTransfer,
                title: format!(
                    "{} transferred {} -> {}",
                    record.item.evidence_number, transfer.from_department, transfer.to_department
                ),
                description: transfer.notes.clone().unwrap_or_default(),
                performed_by: transfer.transferred_by.clone(),
                occurred_at: transfer.occurred_at,
            };
            (transfer, event)
        };

        let timeline_warning = match self.timeline.record(event) {
            Ok(()) => None,
            Err(err) => {
                tracing::warn!(
                    evidence_id = %evidence_id,
                    seq = transfer.seq,
                    error = %err,
                    "custody transfer committed but timeline delivery failed"
                );
                Some(err.to_string())
            }
        };

        Ok(TransferReceipt {
            transfer,
            timeline_warning,
        })
    }

    /// The item's custody chain, ordered by sequence number ascending.
    ///
    /// Safe to re-read at any time: returns the same prefix plus any
    /// newly appended suffix.
    pub fn list_transfers(&self, evidence_id: EvidenceId) -> Result<Vec<CustodyTransfer>, CustodyError> {
        let vault = self.lock_vault();
        vault
            .records
            .get(&evidence_id)
            .map(|r| r.ledger.clone())
            .ok_or(CustodyError::NotFound { evidence_id })
    }

    fn lock_vault(&self) -> MutexGuard<'_, Vault> {
        // Recover from poisoning: every critical section leaves the
        // vault consistent before any fallible call.
        self.vault.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn authorize(actor: &Actor, action: Action, case_department: Department) -> Result<(), CustodyError> {
    if allowed(actor, action, &Resource::Evidence { case_department }) {
        Ok(())
    } else {
        Err(CustodyError::Permission { action })
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cases::InMemoryCaseDirectory;
    use crate::item::DeviceType;
    use crate::timeline::{MemoryTimelineSink, NullTimelineSink, SinkError};
    use custos_core::{AccountId, CaseId, Role};

    struct Fixture {
        registry: EvidenceRegistry,
        sink: Arc<MemoryTimelineSink>,
        case_id: CaseId,
        admin: Actor,
    }

    fn fixture() -> Fixture {
        let cases = Arc::new(InMemoryCaseDirectory::new());
        let case_id = CaseId::new();
        cases.register(case_id, Department::Sur);
        let sink = Arc::new(MemoryTimelineSink::new());
        let registry = EvidenceRegistry::new(cases, sink.clone());
        let admin = Actor::new(AccountId::new(), "Chief Admin", Role::Admin, Department::Ibs);
        Fixture {
            registry,
            sink,
            case_id,
            admin,
        }
    }

    fn intake(case_id: CaseId, number: &str) -> EvidenceIntake {
        EvidenceIntake {
            case_id,
            evidence_number: number.to_string(),
            lab_number: None,
            device_type: DeviceType::Mobile,
            item_name: "Samsung S23, black".to_string(),
            description: String::new(),
            brand: Some("Samsung".to_string()),
            model: Some("SM-S911".to_string()),
            serial_number: None,
            identifying_numbers: vec!["356938035643809".to_string()],
            origin_department: Department::Sur,
            collected_by: "A. Martis".to_string(),
        }
    }

    fn order(to: Department, claimed: Option<Department>) -> TransferOrder {
        TransferOrder {
            to_department: to,
            transferred_by: "A. Martis".to_string(),
            claimed_from: claimed,
            notes: None,
        }
    }

    // ── Intake ───────────────────────────────────────────────────────

    #[test]
    fn test_create_starts_with_empty_ledger() {
        let f = fixture();
        let item = f.registry.create(intake(f.case_id, "E-1001"), &f.admin).unwrap();
        assert_eq!(item.status, EvidenceStatus::Collected);
        assert_eq!(item.current_department, Department::Sur);
        assert_eq!(item.origin_department, Department::Sur);
        assert!(f.registry.list_transfers(item.id).unwrap().is_empty());
    }

    #[test]
    fn test_create_unknown_case_rejected() {
        let f = fixture();
        let err = f
            .registry
            .create(intake(CaseId::new(), "E-1001"), &f.admin)
            .unwrap_err();
        assert!(matches!(err, CustodyError::Validation { field: "case_id", .. }));
    }

    #[test]
    fn test_create_missing_name_rejected() {
        let f = fixture();
        let mut form = intake(f.case_id, "E-1001");
        form.item_name = "   ".to_string();
        let err = f.registry.create(form, &f.admin).unwrap_err();
        assert!(matches!(err, CustodyError::Validation { field: "item_name", .. }));
    }

    #[test]
    fn test_create_duplicate_number_rejected() {
        let f = fixture();
        f.registry.create(intake(f.case_id, "E-1001"), &f.admin).unwrap();
        let err = f
            .registry
            .create(intake(f.case_id, "E-1001"), &f.admin)
            .unwrap_err();
        assert!(matches!(err, CustodyError::Validation { field: "evidence_number", .. }));
    }

    #[test]
    fn test_create_denied_for_regular_user() {
        let f = fixture();
        let user = Actor::new(AccountId::new(), "J. Doe", Role::User, Department::Sur);
        let err = f.registry.create(intake(f.case_id, "E-1001"), &user).unwrap_err();
        assert!(matches!(err, CustodyError::Permission { action: Action::Write }));
    }

    // ── Custody appends ──────────────────────────────────────────────

    #[test]
    fn test_append_updates_projection() {
        let f = fixture();
        let item = f.registry.create(intake(f.case_id, "E-1001"), &f.admin).unwrap();
        let receipt = f
            .registry
            .append_transfer(item.id, order(Department::Alpha, Some(Department::Sur)), &f.admin)
            .unwrap();

        assert_eq!(receipt.transfer.seq, 0);
        assert_eq!(receipt.transfer.from_department, Department::Sur);
        assert_eq!(receipt.transfer.to_department, Department::Alpha);
        assert!(receipt.timeline_warning.is_none());

        let item = f.registry.get(item.id).unwrap();
        assert_eq!(item.current_department, Department::Alpha);
        assert_eq!(f.sink.events().len(), 1);
    }

    #[test]
    fn test_append_claimed_origin_mismatch() {
        let f = fixture();
        let item = f.registry.create(intake(f.case_id, "E-1001"), &f.admin).unwrap();
        f.registry
            .append_transfer(item.id, order(Department::Alpha, None), &f.admin)
            .unwrap();

        let err = f
            .registry
            .append_transfer(item.id, order(Department::Ibs, Some(Department::Fraude)), &f.admin)
            .unwrap_err();
        match err {
            CustodyError::CustodyConflict { actual, claimed } => {
                assert_eq!(actual, Department::Alpha);
                assert_eq!(claimed, Department::Fraude);
            }
            other => panic!("expected CustodyConflict, got {other:?}"),
        }
        // The failed attempt left no entry behind.
        assert_eq!(f.registry.list_transfers(item.id).unwrap().len(), 1);
    }

    #[test]
    fn test_append_without_claim_uses_current() {
        let f = fixture();
        let item = f.registry.create(intake(f.case_id, "E-1001"), &f.admin).unwrap();
        f.registry
            .append_transfer(item.id, order(Department::Alpha, None), &f.admin)
            .unwrap();
        let receipt = f
            .registry
            .append_transfer(item.id, order(Department::Ibs, None), &f.admin)
            .unwrap();
        assert_eq!(receipt.transfer.from_department, Department::Alpha);
        assert_eq!(receipt.transfer.seq, 1);
    }

    #[test]
    fn test_append_to_current_holder_rejected() {
        let f = fixture();
        let item = f.registry.create(intake(f.case_id, "E-1001"), &f.admin).unwrap();
        let err = f
            .registry
            .append_transfer(item.id, order(Department::Sur, None), &f.admin)
            .unwrap_err();
        assert!(matches!(err, CustodyError::Validation { field: "to_department", .. }));
    }

    #[test]
    fn test_append_unknown_item() {
        let f = fixture();
        let err = f
            .registry
            .append_transfer(EvidenceId::new(), order(Department::Ibs, None), &f.admin)
            .unwrap_err();
        assert!(matches!(err, CustodyError::NotFound { .. }));
    }

    #[test]
    fn test_chain_has_no_gaps() {
        let f = fixture();
        let item = f.registry.create(intake(f.case_id, "E-1001"), &f.admin).unwrap();
        for dept in [Department::Alpha, Department::Ibs, Department::Fraude, Department::Ibs] {
            f.registry
                .append_transfer(item.id, order(dept, None), &f.admin)
                .unwrap();
        }
        let chain = f.registry.list_transfers(item.id).unwrap();
        assert_eq!(chain[0].from_department, Department::Sur);
        for (n, window) in chain.windows(2).enumerate() {
            assert_eq!(window[1].from_department, window[0].to_department);
            assert_eq!(window[0].seq, n as u64);
        }
        let item = f.registry.get(item.id).unwrap();
        assert_eq!(item.current_department, chain.last().unwrap().to_department);
    }

    // ── Status lifecycle ─────────────────────────────────────────────

    #[test]
    fn test_analysis_requires_prior_transfer() {
        let f = fixture();
        let item = f.registry.create(intake(f.case_id, "E-1001"), &f.admin).unwrap();
        let err = f
            .registry
            .update_status(item.id, EvidenceStatus::InAnalysis, &f.admin)
            .unwrap_err();
        assert!(matches!(err, CustodyError::InvalidTransition { .. }));

        f.registry
            .append_transfer(item.id, order(Department::Alpha, None), &f.admin)
            .unwrap();
        let item = f
            .registry
            .update_status(item.id, EvidenceStatus::InAnalysis, &f.admin)
            .unwrap();
        assert_eq!(item.status, EvidenceStatus::InAnalysis);
    }

    #[test]
    fn test_terminal_seals_ledger_and_status() {
        let f = fixture();
        let item = f.registry.create(intake(f.case_id, "E-1001"), &f.admin).unwrap();
        f.registry
            .append_transfer(item.id, order(Department::Alpha, None), &f.admin)
            .unwrap();
        f.registry
            .update_status(item.id, EvidenceStatus::InAnalysis, &f.admin)
            .unwrap();
        f.registry
            .update_status(item.id, EvidenceStatus::Released, &f.admin)
            .unwrap();

        let before = f.registry.list_transfers(item.id).unwrap().len();
        let err = f
            .registry
            .append_transfer(item.id, order(Department::Ibs, None), &f.admin)
            .unwrap_err();
        assert!(matches!(err, CustodyError::TerminalState { .. }));
        assert_eq!(f.registry.list_transfers(item.id).unwrap().len(), before);

        let err = f
            .registry
            .update_status(item.id, EvidenceStatus::InStorage, &f.admin)
            .unwrap_err();
        assert!(matches!(err, CustodyError::TerminalState { .. }));
    }

    #[test]
    fn test_damage_flag_allowed_on_terminal() {
        let f = fixture();
        let item = f.registry.create(intake(f.case_id, "E-1001"), &f.admin).unwrap();
        f.registry
            .append_transfer(item.id, order(Department::Alpha, None), &f.admin)
            .unwrap();
        f.registry
            .update_status(item.id, EvidenceStatus::InAnalysis, &f.admin)
            .unwrap();
        f.registry
            .update_status(item.id, EvidenceStatus::Destroyed, &f.admin)
            .unwrap();

        let item = f
            .registry
            .set_damaged(item.id, true, Some("screen cracked".to_string()), &f.admin)
            .unwrap();
        assert!(item.damages);
        assert_eq!(item.damage_description.as_deref(), Some("screen cracked"));
    }

    // ── Deletion ─────────────────────────────────────────────────────

    #[test]
    fn test_delete_with_history_refused() {
        let f = fixture();
        let item = f.registry.create(intake(f.case_id, "E-1001"), &f.admin).unwrap();
        f.registry
            .append_transfer(item.id, order(Department::Alpha, None), &f.admin)
            .unwrap();
        let err = f.registry.delete(item.id, &f.admin).unwrap_err();
        match err {
            CustodyError::HistoryRetained { transfers, .. } => assert_eq!(transfers, 1),
            other => panic!("expected HistoryRetained, got {other:?}"),
        }
    }

    #[test]
    fn test_delete_created_in_error() {
        let f = fixture();
        let item = f.registry.create(intake(f.case_id, "E-1001"), &f.admin).unwrap();
        f.registry.delete(item.id, &f.admin).unwrap();
        assert!(matches!(
            f.registry.get(item.id),
            Err(CustodyError::NotFound { .. })
        ));
        // The number is free again after the erroneous intake.
        f.registry.create(intake(f.case_id, "E-1001"), &f.admin).unwrap();
    }

    // ── Department scoping ───────────────────────────────────────────

    #[test]
    fn test_analyst_transfers_within_case_department_only() {
        let f = fixture();
        let item = f.registry.create(intake(f.case_id, "E-1001"), &f.admin).unwrap();

        let outsider = Actor::new(AccountId::new(), "Outsider", Role::Analyst, Department::Douane);
        let err = f
            .registry
            .append_transfer(item.id, order(Department::Ibs, None), &outsider)
            .unwrap_err();
        assert!(matches!(err, CustodyError::Permission { action: Action::Transfer }));

        let insider = Actor::new(AccountId::new(), "Insider", Role::Analyst, Department::Sur);
        f.registry
            .append_transfer(item.id, order(Department::Ibs, None), &insider)
            .unwrap();
    }

    // ── Timeline side-effect ─────────────────────────────────────────

    struct FailingSink;

    impl TimelineSink for FailingSink {
        fn record(&self, _event: TimelineEvent) -> Result<(), SinkError> {
            Err(SinkError("queue unavailable".to_string()))
        }
    }

    #[test]
    fn test_timeline_failure_warns_but_commits() {
        let cases = Arc::new(InMemoryCaseDirectory::new());
        let case_id = CaseId::new();
        cases.register(case_id, Department::Sur);
        let registry = EvidenceRegistry::new(cases, Arc::new(FailingSink));
        let admin = Actor::new(AccountId::new(), "Chief Admin", Role::Admin, Department::Ibs);

        let item = registry.create(intake(case_id, "E-1001"), &admin).unwrap();
        let receipt = registry
            .append_transfer(item.id, order(Department::Alpha, None), &admin)
            .unwrap();

        assert!(receipt.timeline_warning.is_some());
        assert_eq!(registry.list_transfers(item.id).unwrap().len(), 1);
        assert_eq!(registry.get(item.id).unwrap().current_department, Department::Alpha);
    }

    // ── The worked scenario ──────────────────────────────────────────

    #[test]
    fn test_scenario_e1001() {
        let f = fixture();
        // Created with origin Sur; transfer 1 Sur -> Alpha succeeds.
        let item = f.registry.create(intake(f.case_id, "E-1001"), &f.admin).unwrap();
        f.registry
            .append_transfer(item.id, order(Department::Alpha, Some(Department::Sur)), &f.admin)
            .unwrap();
        assert_eq!(f.registry.get(item.id).unwrap().current_department, Department::Alpha);

        // Transfer 2 claims Fraude -> Ibs; actual custodian is Alpha.
        let err = f
            .registry
            .append_transfer(item.id, order(Department::Ibs, Some(Department::Fraude)), &f.admin)
            .unwrap_err();
        assert!(matches!(
            err,
            CustodyError::CustodyConflict { actual: Department::Alpha, claimed: Department::Fraude }
        ));

        // Release the item; any further transfer is sealed out.
        f.registry
            .update_status(item.id, EvidenceStatus::InAnalysis, &f.admin)
            .unwrap();
        f.registry
            .update_status(item.id, EvidenceStatus::Released, &f.admin)
            .unwrap();
        let err = f
            .registry
            .append_transfer(item.id, order(Department::Ibs, Some(Department::Alpha)), &f.admin)
            .unwrap_err();
        assert!(matches!(err, CustodyError::TerminalState { .. }));
    }

    // ── Concurrency ──────────────────────────────────────────────────

    #[test]
    fn test_racing_appends_one_wins() {
        let cases = Arc::new(InMemoryCaseDirectory::new());
        let case_id = CaseId::new();
        cases.register(case_id, Department::Sur);
        let registry = Arc::new(EvidenceRegistry::new(cases, Arc::new(NullTimelineSink)));
        let admin = Actor::new(AccountId::new(), "Chief Admin", Role::Admin, Department::Ibs);

        let item = registry.create(intake(case_id, "E-1001"), &admin).unwrap();

        let mut handles = Vec::new();
        for dept in [Department::Alpha, Department::Ibs] {
            let registry = Arc::clone(&registry);
            let admin = admin.clone();
            let id = item.id;
            handles.push(std::thread::spawn(move || {
                registry.append_transfer(id, order(dept, Some(Department::Sur)), &admin)
            }));
        }
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        let successes = results.iter().filter(|r| r.is_ok()).count();
        let conflicts = results
            .iter()
            .filter(|r| matches!(r, Err(CustodyError::CustodyConflict { .. })))
            .count();
        assert_eq!(successes, 1);
        assert_eq!(conflicts, 1);
        assert_eq!(registry.list_transfers(item.id).unwrap().len(), 1);
    }

    // ── Chain continuity property ────────────────────────────────────

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Any sequence of accepted handoffs leaves a gap-free chain
            /// whose tail matches the custodian projection.
            #[test]
            fn prop_chain_continuity(hops in proptest::collection::vec(0usize..14, 1..12)) {
                let cases = Arc::new(InMemoryCaseDirectory::new());
                let case_id = CaseId::new();
                cases.register(case_id, Department::Sur);
                let registry = EvidenceRegistry::new(cases, Arc::new(NullTimelineSink));
                let admin = Actor::new(AccountId::new(), "Chief Admin", Role::Admin, Department::Ibs);
                let item = registry.create(intake(case_id, "E-PROP"), &admin).unwrap();

                for hop in hops {
                    let dept = Department::all()[hop];
                    // Handoffs to the current holder are rejected without
                    // appending; everything else must chain.
                    let _ = registry.append_transfer(item.id, order(dept, None), &admin);
                }

                let chain = registry.list_transfers(item.id).unwrap();
                let mut previous = Department::Sur;
                for entry in &chain {
                    prop_assert_eq!(entry.from_department, previous);
                    previous = entry.to_department;
                }
                let current = registry.get(item.id).unwrap().current_department;
                prop_assert_eq!(current, previous);
            }
        }
    }
}
