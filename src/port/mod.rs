//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the extension points in the hexagonal architecture.
//! They are traits that adapters implement to integrate with external
//! systems. This crate only has outbound (driven) ports; the inbound
//! side is the CLI, which calls services directly.
//!
//! # Architecture
//!
//! ```text
//!              ┌───────────────────────────┐
//!              │          CLI              │
//!              └────────────┬──────────────┘
//!                           ▼
//!              ┌───────────────────────────┐
//!              │   Service (checkout,      │
//!              │   catalog)                │
//!              └────┬───────┬───────┬──────┘
//!                   ▼       ▼       ▼
//!             ItemStore PurchaseStore ReconciliationJournal
//!                   │       │       │
//!              ┌────┴───────┴───────┴──────┐
//!              │  memory / sqlite adapters │
//!              └───────────────────────────┘
//! ```

pub mod outbound;

pub use outbound::{ItemStore, PurchaseStore, ReconciliationJournal};
