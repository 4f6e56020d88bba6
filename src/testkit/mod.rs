//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Builders for listings and purchases so tests focus on
//!   assertions rather than construction boilerplate.
//! - [`store`] - Fault-injecting store wrappers for exercising the
//!   compensation and journaling paths of checkout.

pub mod domain;
pub mod store;

pub use domain::{food_item, purchase, FoodItemBuilder, PurchaseBuilder};
pub use store::{FaultyItemStore, FaultyPurchaseStore};
