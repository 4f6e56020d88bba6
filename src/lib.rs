//! Plateful - food marketplace checkout and inventory backend.
//!
//! This crate implements the purchase transaction core of a food-ordering
//! marketplace: vendors list dishes, customers place and cancel orders,
//! and the listing counters (`availability`, `purchase_count`) stay
//! consistent under concurrent checkouts without cross-document
//! transactions.
//!
//! # Architecture
//!
//! Hexagonal: domain types at the center, async port traits at the seams,
//! swappable adapters on both sides.
//!
//! - [`domain`] - Listings, purchases, incidents, and identity newtypes
//! - [`port`] - Outbound port traits the services drive
//! - [`service`] - Checkout and catalog flows over the ports
//! - [`adapter`] - SQLite and in-memory outbound adapters, CLI inbound
//! - [`app`] - Configuration and service wiring
//! - [`error`] - Error types for the crate
//!
//! # Checkout model
//!
//! A purchase is deliberately two steps against two independent stores:
//! record the order, then debit the listing's counters with a single
//! conditional update. The pair is not transactional; a failure between
//! the steps is compensated where possible and otherwise journaled as a
//! reconciliation incident, never hidden.
//!
//! # Features
//!
//! - `testkit` - Expose domain builders and fault-injection store
//!   wrappers for downstream integration tests

pub mod adapter;
pub mod app;
pub mod domain;
pub mod error;
pub mod port;
pub mod service;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
