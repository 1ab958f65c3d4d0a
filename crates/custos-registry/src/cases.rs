//! # Case Directory Seam
//!
//! Case records are owned by an external collaborator; the registry only
//! needs to know whether a case exists and which department owns it (the
//! access-control scope for the case's evidence). This trait is that
//! seam, with an in-memory implementation for tests and single-process
//! deployments.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use custos_core::{CaseId, Department};

/// Read-only view of the case collaborator.
pub trait CaseDirectory: Send + Sync {
    /// The owning department of a case, or `None` if the case is unknown.
    fn department(&self, case_id: &CaseId) -> Option<Department>;
}

/// In-memory case directory.
#[derive(Debug, Default)]
pub struct InMemoryCaseDirectory {
    cases: RwLock<HashMap<CaseId, Department>>,
}

impl InMemoryCaseDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a case with its owning department.
    pub fn register(&self, case_id: CaseId, department: Department) {
        // Recover from poisoning: the map holds plain values and a
        // panicked writer cannot leave it torn.
        self.cases
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(case_id, department);
    }
}

impl CaseDirectory for InMemoryCaseDirectory {
    fn department(&self, case_id: &CaseId) -> Option<Department> {
        self.cases
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(case_id)
            .copied()
    }
}
