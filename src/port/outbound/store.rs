//! Persistence ports for food listings and purchase records.
//!
//! The two stores are intentionally separate traits: the original system
//! keeps listings and orders in separate collections with no transaction
//! spanning them, and the checkout flow is written against exactly that
//! model. An adapter backed by a single database must still present the
//! two-store contract, including the "affected row count" results that
//! the reconciliation logic keys on.

use std::future::Future;

use crate::domain::food::{CounterAdjustment, FoodItem, ListingPatch, NewFoodItem};
use crate::domain::id::{FoodId, PurchaseId};
use crate::domain::purchase::{NewPurchase, PurchaseRecord};
use crate::error::StoreResult;

/// Storage operations for food listings.
pub trait ItemStore: Send + Sync {
    /// Persist a new listing and return its store-assigned identity.
    fn insert(&self, item: NewFoodItem) -> impl Future<Output = StoreResult<FoodId>> + Send;

    /// Fetch a listing by identity.
    fn get(&self, id: &FoodId) -> impl Future<Output = StoreResult<Option<FoodItem>>> + Send;

    /// Overwrite the vendor-editable fields named in `patch`. Returns the
    /// number of listings modified (0 when `id` matches nothing).
    fn update_listing(
        &self,
        id: &FoodId,
        patch: ListingPatch,
    ) -> impl Future<Output = StoreResult<usize>> + Send;

    /// Apply a counter adjustment as one atomic conditional operation.
    ///
    /// Returns the number of listings modified: 1 when the adjustment
    /// applied, 0 when `id` matched nothing or the stock floor in
    /// `adjustment` was not met. Implementations must evaluate the floor
    /// and apply the deltas in the same indivisible step, with no window
    /// in which another writer can observe or interleave a partial state.
    fn adjust_counters(
        &self,
        id: &FoodId,
        adjustment: CounterAdjustment,
    ) -> impl Future<Output = StoreResult<usize>> + Send;
}

/// Storage operations for purchase records.
pub trait PurchaseStore: Send + Sync {
    /// Persist a new purchase and return its store-assigned identity.
    fn insert(&self, purchase: NewPurchase) -> impl Future<Output = StoreResult<PurchaseId>> + Send;

    /// Fetch a purchase by identity. When `customer_email` is given, a
    /// record owned by a different customer is reported as absent, not as
    /// a distinct "wrong owner" case.
    fn find(
        &self,
        id: &PurchaseId,
        customer_email: Option<&str>,
    ) -> impl Future<Output = StoreResult<Option<PurchaseRecord>>> + Send;

    /// Delete a purchase, filtered the same way as [`find`](Self::find).
    /// Returns the number of records deleted.
    fn delete(
        &self,
        id: &PurchaseId,
        customer_email: Option<&str>,
    ) -> impl Future<Output = StoreResult<usize>> + Send;

    /// All purchases placed by the given customer, oldest first.
    fn list_for_customer(
        &self,
        customer_email: &str,
    ) -> impl Future<Output = StoreResult<Vec<PurchaseRecord>>> + Send;
}
