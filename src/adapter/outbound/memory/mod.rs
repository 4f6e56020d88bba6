//! In-memory adapters, used for tests and ephemeral runs.

mod journal;
mod store;

pub use journal::MemoryJournal;
pub use store::{MemoryItemStore, MemoryPurchaseStore};
