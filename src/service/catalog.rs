//! Catalog maintenance: creating, reading, and editing listings.
//!
//! Everything here is single-store and free of the reconciliation rules
//! that govern checkout. The one invariant worth naming: the sale
//! counters are not reachable from this service. A new listing starts
//! with zero units sold, and no patch can touch `purchase_count`.

use std::sync::Arc;

use tracing::info;

use crate::domain::food::{FoodItem, ListingPatch, NewFoodItem};
use crate::domain::id::FoodId;
use crate::error::{CatalogError, StoreError};
use crate::port::outbound::store::ItemStore;

/// Vendor-facing catalog operations.
pub struct CatalogService<I> {
    items: Arc<I>,
}

impl<I> CatalogService<I>
where
    I: ItemStore,
{
    /// Create a catalog service over the given item store.
    pub fn new(items: Arc<I>) -> Self {
        Self { items }
    }

    /// Create a listing and return its store-assigned identity.
    pub async fn add_item(&self, draft: NewFoodItem) -> Result<FoodId, CatalogError> {
        let name = draft.name.clone();
        let id = match self.items.insert(draft).await {
            Ok(id) => id,
            Err(StoreError::WriteUnacknowledged) => return Err(CatalogError::WriteFailed),
            Err(e) => return Err(CatalogError::StoreUnavailable(e)),
        };
        info!(food_id = %id, name = %name, "Listing created");
        Ok(id)
    }

    /// Fetch a listing by caller-supplied reference.
    pub async fn item(&self, reference: &str) -> Result<FoodItem, CatalogError> {
        let id = FoodId::parse(reference)?;
        self.items.get(&id).await?.ok_or(CatalogError::NotFound)
    }

    /// Overwrite the vendor-editable fields named in `patch`.
    ///
    /// An empty patch still verifies the listing exists, so callers get
    /// the same `NotFound` whether or not they supplied changes.
    pub async fn update_listing(
        &self,
        reference: &str,
        patch: ListingPatch,
    ) -> Result<(), CatalogError> {
        let id = FoodId::parse(reference)?;

        if patch.is_empty() {
            return match self.items.get(&id).await? {
                Some(_) => Ok(()),
                None => Err(CatalogError::NotFound),
            };
        }

        let modified = self.items.update_listing(&id, patch).await?;
        if modified == 0 {
            return Err(CatalogError::NotFound);
        }
        info!(food_id = %id, "Listing updated");
        Ok(())
    }
}
