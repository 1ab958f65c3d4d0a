//! # Application State
//!
//! Shared state for the Axum application: the domain services and the
//! in-process case directory they were wired with.

use std::sync::Arc;

use custos_access::AdmissionController;
use custos_registry::{EvidenceRegistry, InMemoryCaseDirectory, MemoryTimelineSink};

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    /// Evidence registry and custody ledger.
    pub registry: Arc<EvidenceRegistry>,
    /// Access admission controller.
    pub admission: Arc<AdmissionController>,
    /// Case directory the registry validates against.
    pub cases: Arc<InMemoryCaseDirectory>,
}

impl AppState {
    /// Assemble state from existing service handles.
    pub fn new(
        registry: Arc<EvidenceRegistry>,
        admission: Arc<AdmissionController>,
        cases: Arc<InMemoryCaseDirectory>,
    ) -> Self {
        Self {
            registry,
            admission,
            cases,
        }
    }

    /// Fully in-process wiring: in-memory case directory and a buffered
    /// timeline sink. Used by the server binary and tests.
    pub fn in_memory() -> Self {
        let cases = Arc::new(InMemoryCaseDirectory::new());
        let timeline = Arc::new(MemoryTimelineSink::new());
        let registry = Arc::new(EvidenceRegistry::new(cases.clone(), timeline));
        let admission = Arc::new(AdmissionController::new());
        Self::new(registry, admission, cases)
    }
}
