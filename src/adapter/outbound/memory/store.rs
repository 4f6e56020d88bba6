//! In-memory store implementations.
//!
//! Backed by concurrent maps, so the conditional counter adjustment has
//! the same atomicity as the database-backed store: the floor check and
//! the deltas happen under the entry's write lock.

use chrono::Utc;
use dashmap::DashMap;

use crate::domain::food::{CounterAdjustment, FoodItem, ListingPatch, NewFoodItem};
use crate::domain::id::{FoodId, PurchaseId};
use crate::domain::purchase::{NewPurchase, PurchaseRecord};
use crate::error::StoreResult;
use crate::port::outbound::store::{ItemStore, PurchaseStore};

/// Thread-safe in-memory food listing store.
#[derive(Default)]
pub struct MemoryItemStore {
    items: DashMap<FoodId, FoodItem>,
}

impl MemoryItemStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of listings currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the store holds no listings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ItemStore for MemoryItemStore {
    async fn insert(&self, item: NewFoodItem) -> StoreResult<FoodId> {
        let id = FoodId::generate();
        self.items.insert(
            id,
            FoodItem {
                id,
                name: item.name,
                image: item.image,
                price: item.price,
                category: item.category,
                portion: item.portion,
                availability: item.availability,
                origin: item.origin,
                description: item.description,
                added_by: item.added_by,
                purchase_count: 0,
                created_at: Utc::now(),
            },
        );
        Ok(id)
    }

    async fn get(&self, id: &FoodId) -> StoreResult<Option<FoodItem>> {
        Ok(self.items.get(id).map(|entry| entry.clone()))
    }

    async fn update_listing(&self, id: &FoodId, patch: ListingPatch) -> StoreResult<usize> {
        let Some(mut entry) = self.items.get_mut(id) else {
            return Ok(0);
        };
        if let Some(name) = patch.name {
            entry.name = name;
        }
        if let Some(image) = patch.image {
            entry.image = image;
        }
        if let Some(price) = patch.price {
            entry.price = price;
        }
        if let Some(category) = patch.category {
            entry.category = category;
        }
        if let Some(portion) = patch.portion {
            entry.portion = portion;
        }
        if let Some(availability) = patch.availability {
            entry.availability = availability;
        }
        if let Some(origin) = patch.origin {
            entry.origin = origin;
        }
        if let Some(description) = patch.description {
            entry.description = description;
        }
        Ok(1)
    }

    async fn adjust_counters(
        &self,
        id: &FoodId,
        adjustment: CounterAdjustment,
    ) -> StoreResult<usize> {
        // get_mut holds the entry's write lock for the whole check-and-set.
        let Some(mut entry) = self.items.get_mut(id) else {
            return Ok(0);
        };
        if let Some(floor) = adjustment.min_availability {
            if entry.availability < floor {
                return Ok(0);
            }
        }
        entry.availability += adjustment.availability_delta;
        entry.purchase_count += adjustment.purchase_count_delta;
        Ok(1)
    }
}

/// Thread-safe in-memory purchase store.
#[derive(Default)]
pub struct MemoryPurchaseStore {
    records: DashMap<PurchaseId, PurchaseRecord>,
}

impl MemoryPurchaseStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of purchase records currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl PurchaseStore for MemoryPurchaseStore {
    async fn insert(&self, purchase: NewPurchase) -> StoreResult<PurchaseId> {
        let id = PurchaseId::generate();
        self.records.insert(
            id,
            PurchaseRecord {
                id,
                food_id: purchase.food_id,
                customer_email: purchase.customer_email,
                quantity: purchase.quantity,
                metadata: purchase.metadata,
                purchased_at: Utc::now(),
            },
        );
        Ok(id)
    }

    async fn find(
        &self,
        id: &PurchaseId,
        customer_email: Option<&str>,
    ) -> StoreResult<Option<PurchaseRecord>> {
        Ok(self.records.get(id).map(|entry| entry.clone()).filter(
            |record| match customer_email {
                Some(email) => record.customer_email == email,
                None => true,
            },
        ))
    }

    async fn delete(&self, id: &PurchaseId, customer_email: Option<&str>) -> StoreResult<usize> {
        let removed = self
            .records
            .remove_if(id, |_, record| match customer_email {
                Some(email) => record.customer_email == email,
                None => true,
            });
        Ok(usize::from(removed.is_some()))
    }

    async fn list_for_customer(&self, customer_email: &str) -> StoreResult<Vec<PurchaseRecord>> {
        let mut records: Vec<PurchaseRecord> = self
            .records
            .iter()
            .filter(|entry| entry.customer_email == customer_email)
            .map(|entry| entry.clone())
            .collect();
        records.sort_by_key(|record| record.purchased_at);
        Ok(records)
    }
}
