//! Reconciliation journal port.
//!
//! The journal is the landing place for divergences the checkout flow
//! could not repair on its own. Recording must never fail the flow that
//! detected the divergence; an adapter that cannot persist an incident
//! logs it at error level instead, so the information survives at least
//! in the log stream.

use crate::domain::incident::Incident;
use crate::error::StoreResult;

/// Sink and ops view for reconciliation incidents.
pub trait ReconciliationJournal: Send + Sync {
    /// Record a divergence. Infallible by contract: implementations
    /// swallow their own write errors after logging them.
    fn record(&self, incident: &Incident);

    /// All incidents awaiting reconciliation, oldest first.
    fn list_open(&self) -> StoreResult<Vec<Incident>>;
}
