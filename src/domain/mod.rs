//! Store-agnostic domain types.
//!
//! Everything here is plain data plus small invariant-preserving
//! behavior. Nothing in this module touches a store, a clock source
//! other than construction timestamps, or any I/O.

pub mod food;
pub mod id;
pub mod identity;
pub mod incident;
pub mod purchase;

// Core domain types
pub use food::{CounterAdjustment, FoodItem, ListingPatch, NewFoodItem, Vendor};
pub use id::{FoodId, IncidentId, MalformedReference, PurchaseId};
pub use identity::VerifiedIdentity;
pub use incident::Incident;
pub use purchase::{NewPurchase, OrderMetadata, PurchaseRecord, PurchaseRequest};
