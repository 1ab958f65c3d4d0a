//! # Custody Transfer Records
//!
//! A single entry in an item's chain of custody. Entries are immutable
//! once appended and totally ordered by `seq` — the timestamp is
//! metadata for the record, never the ordering key, so clock skew
//! between department systems cannot reorder a chain.

use serde::{Deserialize, Serialize};

use custos_core::{AccountId, Department, EvidenceId, Timestamp, TransferId};

/// One custodial handoff of an evidence item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustodyTransfer {
    /// Unique identifier of this entry.
    pub id: TransferId,
    /// The item the entry belongs to.
    pub evidence_id: EvidenceId,
    /// Position in the item's chain, starting at 0.
    pub seq: u64,
    /// The custodian handing the item over.
    pub from_department: Department,
    /// The custodian receiving the item.
    pub to_department: Department,
    /// Name of the person physically performing the handoff.
    pub transferred_by: String,
    /// The account that recorded the transfer.
    pub recorded_by: AccountId,
    /// When the handoff was recorded.
    pub occurred_at: Timestamp,
    /// Free-text notes on the handoff.
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_roundtrip() {
        let transfer = CustodyTransfer {
            id: TransferId::new(),
            evidence_id: EvidenceId::new(),
            seq: 3,
            from_department: Department::Sur,
            to_department: Department::Ibs,
            transferred_by: "A. Martis".to_string(),
            recorded_by: AccountId::new(),
            occurred_at: Timestamp::now(),
            notes: Some("sealed bag intact".to_string()),
        };
        let json = serde_json::to_string(&transfer).unwrap();
        let parsed: CustodyTransfer = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.seq, 3);
        assert_eq!(parsed.from_department, Department::Sur);
        assert_eq!(parsed.to_department, Department::Ibs);
    }
}
