//! Fault-injecting store wrappers.
//!
//! Each wrapper delegates to an inner store until a fault is switched
//! on, then fails (or swallows) the targeted operation on every call.
//! This is how tests reach the checkout paths that only exist for store
//! failures: compensation, `WriteFailed`, and the incident journal.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::food::{CounterAdjustment, FoodItem, ListingPatch, NewFoodItem};
use crate::domain::id::{FoodId, PurchaseId};
use crate::domain::purchase::{NewPurchase, PurchaseRecord};
use crate::error::{StoreError, StoreResult};
use crate::port::outbound::store::{ItemStore, PurchaseStore};

fn unavailable(op: &str) -> StoreError {
    StoreError::Unavailable(format!("injected fault: {op}"))
}

/// [`ItemStore`] wrapper with switchable faults.
pub struct FaultyItemStore<I> {
    inner: I,
    fail_get: AtomicBool,
    fail_adjust: AtomicBool,
    swallow_adjust: AtomicBool,
}

impl<I> FaultyItemStore<I> {
    /// Wrap an item store with all faults off.
    pub fn new(inner: I) -> Self {
        Self {
            inner,
            fail_get: AtomicBool::new(false),
            fail_adjust: AtomicBool::new(false),
            swallow_adjust: AtomicBool::new(false),
        }
    }

    /// Make every `get` fail with a transport error.
    pub fn break_gets(&self) {
        self.fail_get.store(true, Ordering::SeqCst);
    }

    /// Make every `adjust_counters` fail with a transport error.
    pub fn break_adjustments(&self) {
        self.fail_adjust.store(true, Ordering::SeqCst);
    }

    /// Make every `adjust_counters` report zero rows without applying.
    pub fn swallow_adjustments(&self) {
        self.swallow_adjust.store(true, Ordering::SeqCst);
    }
}

impl<I> ItemStore for FaultyItemStore<I>
where
    I: ItemStore,
{
    async fn insert(&self, item: NewFoodItem) -> StoreResult<FoodId> {
        self.inner.insert(item).await
    }

    async fn get(&self, id: &FoodId) -> StoreResult<Option<FoodItem>> {
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(unavailable("get"));
        }
        self.inner.get(id).await
    }

    async fn update_listing(&self, id: &FoodId, patch: ListingPatch) -> StoreResult<usize> {
        self.inner.update_listing(id, patch).await
    }

    async fn adjust_counters(
        &self,
        id: &FoodId,
        adjustment: CounterAdjustment,
    ) -> StoreResult<usize> {
        if self.fail_adjust.load(Ordering::SeqCst) {
            return Err(unavailable("adjust_counters"));
        }
        if self.swallow_adjust.load(Ordering::SeqCst) {
            return Ok(0);
        }
        self.inner.adjust_counters(id, adjustment).await
    }
}

/// [`PurchaseStore`] wrapper with switchable faults.
pub struct FaultyPurchaseStore<P> {
    inner: P,
    fail_insert: AtomicBool,
    unacknowledged_insert: AtomicBool,
    fail_delete: AtomicBool,
}

impl<P> FaultyPurchaseStore<P> {
    /// Wrap a purchase store with all faults off.
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            fail_insert: AtomicBool::new(false),
            unacknowledged_insert: AtomicBool::new(false),
            fail_delete: AtomicBool::new(false),
        }
    }

    /// Make every `insert` fail with a transport error.
    pub fn break_inserts(&self) {
        self.fail_insert.store(true, Ordering::SeqCst);
    }

    /// Make every `insert` complete without yielding an identity.
    pub fn refuse_acknowledgement(&self) {
        self.unacknowledged_insert.store(true, Ordering::SeqCst);
    }

    /// Make every `delete` fail with a transport error.
    pub fn break_deletes(&self) {
        self.fail_delete.store(true, Ordering::SeqCst);
    }
}

impl<P> PurchaseStore for FaultyPurchaseStore<P>
where
    P: PurchaseStore,
{
    async fn insert(&self, purchase: NewPurchase) -> StoreResult<PurchaseId> {
        if self.fail_insert.load(Ordering::SeqCst) {
            return Err(unavailable("insert"));
        }
        if self.unacknowledged_insert.load(Ordering::SeqCst) {
            return Err(StoreError::WriteUnacknowledged);
        }
        self.inner.insert(purchase).await
    }

    async fn find(
        &self,
        id: &PurchaseId,
        customer_email: Option<&str>,
    ) -> StoreResult<Option<PurchaseRecord>> {
        self.inner.find(id, customer_email).await
    }

    async fn delete(&self, id: &PurchaseId, customer_email: Option<&str>) -> StoreResult<usize> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(unavailable("delete"));
        }
        self.inner.delete(id, customer_email).await
    }

    async fn list_for_customer(&self, customer_email: &str) -> StoreResult<Vec<PurchaseRecord>> {
        self.inner.list_for_customer(customer_email).await
    }
}
