//! In-memory reconciliation journal.

use parking_lot::RwLock;

use crate::domain::incident::Incident;
use crate::error::StoreResult;
use crate::port::outbound::journal::ReconciliationJournal;

/// Journal that keeps incidents in process memory, in arrival order.
#[derive(Default)]
pub struct MemoryJournal {
    incidents: RwLock<Vec<Incident>>,
}

impl MemoryJournal {
    /// Create an empty journal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReconciliationJournal for MemoryJournal {
    fn record(&self, incident: &Incident) {
        self.incidents.write().push(incident.clone());
    }

    fn list_open(&self) -> StoreResult<Vec<Incident>> {
        Ok(self.incidents.read().clone())
    }
}
