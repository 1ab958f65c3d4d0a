//! # Evidence Item Records
//!
//! The registry's record type for a piece of evidence, plus the intake
//! form it is created from and the seized-device taxonomy.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use custos_core::{
    CaseId, CoreError, Department, EvidenceId, EvidenceNumber, LabNumber, Timestamp,
};
use custos_state::EvidenceStatus;

// ─── Device Taxonomy ─────────────────────────────────────────────────

/// Categories of seized devices and media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceType {
    /// Desktop or laptop computer.
    Computer,
    /// Mobile phone or tablet.
    Mobile,
    /// Storage media (disk, USB, SD card).
    Storage,
    /// Network equipment.
    Network,
    /// Cloud or online account artifact.
    Cloud,
    /// Drone or other UAV.
    Drone,
    /// Gaming console.
    Gaming,
    /// Vehicle or automotive system.
    Vehicle,
    /// IoT or embedded device.
    Iot,
    /// Volatile memory capture.
    Memory,
    /// Video material.
    Video,
    /// DVR/NVR recorder.
    DvrNvr,
    /// Anything outside the fixed taxonomy.
    Other,
}

impl DeviceType {
    /// Returns the snake_case string code for this device type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Computer => "computer",
            Self::Mobile => "mobile",
            Self::Storage => "storage",
            Self::Network => "network",
            Self::Cloud => "cloud",
            Self::Drone => "drone",
            Self::Gaming => "gaming",
            Self::Vehicle => "vehicle",
            Self::Iot => "iot",
            Self::Memory => "memory",
            Self::Video => "video",
            Self::DvrNvr => "dvr_nvr",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for DeviceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "computer" => Ok(Self::Computer),
            "mobile" => Ok(Self::Mobile),
            "storage" => Ok(Self::Storage),
            "network" => Ok(Self::Network),
            "cloud" => Ok(Self::Cloud),
            "drone" => Ok(Self::Drone),
            "gaming" => Ok(Self::Gaming),
            "vehicle" => Ok(Self::Vehicle),
            "iot" => Ok(Self::Iot),
            "memory" => Ok(Self::Memory),
            "video" => Ok(Self::Video),
            "dvr_nvr" => Ok(Self::DvrNvr),
            "other" => Ok(Self::Other),
            other => Err(CoreError::UnknownCode {
                kind: "device_type",
                code: other.to_string(),
            }),
        }
    }
}

// ─── Intake Form ─────────────────────────────────────────────────────

/// Raw intake data for a new evidence item.
///
/// Carries unvalidated strings; the registry validates and converts them
/// at `create()` so a rejected field surfaces as a validation error
/// naming that field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceIntake {
    /// The case the item belongs to.
    pub case_id: CaseId,
    /// Proposed unique evidence number.
    pub evidence_number: String,
    /// Optional secondary lab tracking number.
    pub lab_number: Option<String>,
    /// Device/category of the item.
    pub device_type: DeviceType,
    /// Short human-readable name ("Samsung S23, black").
    pub item_name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Manufacturer brand, if known.
    pub brand: Option<String>,
    /// Model designation, if known.
    pub model: Option<String>,
    /// Serial number, if known.
    pub serial_number: Option<String>,
    /// Additional identifying numbers (IMEIs, MACs, VINs).
    #[serde(default)]
    pub identifying_numbers: Vec<String>,
    /// The department that collected the item.
    pub origin_department: Department,
    /// Name of the collecting officer.
    pub collected_by: String,
}

// ─── Evidence Item ───────────────────────────────────────────────────

/// An evidence item under registry custody.
///
/// `current_department` is a projection of the custody ledger: it equals
/// the `to_department` of the latest entry, or `origin_department` while
/// the ledger is empty. The registry is the only writer, and it writes
/// the field exclusively inside the append critical section — treat the
/// copy you hold as a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceItem {
    /// Unique identifier, immutable.
    pub id: EvidenceId,
    /// Human-readable evidence number, unique and immutable after intake.
    pub evidence_number: EvidenceNumber,
    /// Optional secondary lab tracking number.
    pub lab_number: Option<LabNumber>,
    /// The case this item belongs to.
    pub case_id: CaseId,
    /// The department owning that case; access-control scope for writes.
    pub case_department: Department,
    /// Device/category of the item.
    pub device_type: DeviceType,
    /// Short human-readable name.
    pub item_name: String,
    /// Free-text description.
    pub description: String,
    /// Manufacturer brand, if known.
    pub brand: Option<String>,
    /// Model designation, if known.
    pub model: Option<String>,
    /// Serial number, if known.
    pub serial_number: Option<String>,
    /// Additional identifying numbers (IMEIs, MACs, VINs).
    pub identifying_numbers: Vec<String>,
    /// Lifecycle status.
    pub status: EvidenceStatus,
    /// Whether damage has been observed on the item.
    pub damages: bool,
    /// Description of observed damage.
    pub damage_description: Option<String>,
    /// The department that collected the item.
    pub origin_department: Department,
    /// Derived: the department currently holding the item.
    pub current_department: Department,
    /// Name of the collecting officer.
    pub collected_by: String,
    /// When the item was registered.
    pub created_at: Timestamp,
    /// When the item was last mutated.
    pub updated_at: Timestamp,
}
