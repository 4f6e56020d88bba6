//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the infrastructure the services depend on:
//! the two document stores and the reconciliation journal.

pub mod journal;
pub mod store;

pub use journal::ReconciliationJournal;
pub use store::{ItemStore, PurchaseStore};
