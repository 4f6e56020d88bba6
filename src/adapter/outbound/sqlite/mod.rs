//! SQLite persistence adapters.
//!
//! Provides SQLite-backed implementations of the listing store, the
//! purchase store, and the reconciliation journal using Diesel ORM.

pub mod database;
pub mod journal;
pub mod store;

pub use journal::SqliteJournal;
pub use store::{SqliteItemStore, SqlitePurchaseStore};
