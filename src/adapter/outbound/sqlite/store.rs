//! SQLite store implementations for listings and purchases.
//!
//! Uses Diesel over a pooled SQLite connection. The conditional counter
//! adjustment is a single UPDATE whose WHERE clause carries the stock
//! floor, so the check and the write are one statement and concurrent
//! sales serialize inside the database.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use rust_decimal::Decimal;
use tracing::warn;

use crate::adapter::outbound::sqlite::database::connection::{
    configure_sqlite_connection, DbPool,
};
use crate::adapter::outbound::sqlite::database::model::{
    FoodItemRow, ListingChangeset, PurchaseRow,
};
use crate::adapter::outbound::sqlite::database::schema::{food_items, purchases};
use crate::domain::food::{CounterAdjustment, FoodItem, ListingPatch, NewFoodItem, Vendor};
use crate::domain::id::{FoodId, PurchaseId};
use crate::domain::purchase::{NewPurchase, PurchaseRecord};
use crate::error::{StoreError, StoreResult};
use crate::port::outbound::store::{ItemStore, PurchaseStore};

fn parse_timestamp(text: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| StoreError::Decode(format!("timestamp {text:?}: {e}")))
}

/// Check a connection out of the pool with checkout pragmas applied.
///
/// The busy timeout has to be set on every pooled connection before it
/// competes for the write lock.
fn acquire(
    pool: &DbPool,
) -> StoreResult<PooledConnection<ConnectionManager<SqliteConnection>>> {
    let mut conn = pool
        .get()
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;
    if let Err(e) = configure_sqlite_connection(&mut conn) {
        warn!(error = %e, "failed to configure sqlite connection");
    }
    Ok(conn)
}

/// SQLite-backed food listing store.
pub struct SqliteItemStore {
    /// Database connection pool.
    pool: DbPool,
}

impl SqliteItemStore {
    /// Create a new listing store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn to_row(id: FoodId, item: NewFoodItem, created_at: DateTime<Utc>) -> FoodItemRow {
        FoodItemRow {
            id: id.to_string(),
            name: item.name,
            image: item.image,
            price: item.price.to_string(),
            category: item.category,
            portion: item.portion,
            availability: item.availability,
            origin: item.origin,
            description: item.description,
            added_by_email: item.added_by.email,
            added_by_name: item.added_by.name,
            purchase_count: 0,
            created_at: created_at.to_rfc3339(),
        }
    }

    fn from_row(row: FoodItemRow) -> StoreResult<FoodItem> {
        let id = FoodId::parse(&row.id)
            .map_err(|e| StoreError::Decode(format!("food id: {e}")))?;
        let price = Decimal::from_str(&row.price)
            .map_err(|e| StoreError::Decode(format!("price {:?}: {e}", row.price)))?;
        Ok(FoodItem {
            id,
            name: row.name,
            image: row.image,
            price,
            category: row.category,
            portion: row.portion,
            availability: row.availability,
            origin: row.origin,
            description: row.description,
            added_by: Vendor::new(row.added_by_email, row.added_by_name),
            purchase_count: row.purchase_count,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }

    fn to_changeset(patch: ListingPatch) -> ListingChangeset {
        ListingChangeset {
            name: patch.name,
            image: patch.image,
            price: patch.price.map(|p| p.to_string()),
            category: patch.category,
            portion: patch.portion,
            availability: patch.availability,
            origin: patch.origin,
            description: patch.description,
        }
    }
}

impl ItemStore for SqliteItemStore {
    async fn insert(&self, item: NewFoodItem) -> StoreResult<FoodId> {
        let id = FoodId::generate();
        let row = Self::to_row(id, item, Utc::now());
        let mut conn = acquire(&self.pool)?;

        diesel::insert_into(food_items::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(id)
    }

    async fn get(&self, id: &FoodId) -> StoreResult<Option<FoodItem>> {
        let mut conn = acquire(&self.pool)?;

        let row: Option<FoodItemRow> = food_items::table
            .find(id.to_string())
            .first(&mut conn)
            .optional()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        row.map(Self::from_row).transpose()
    }

    async fn update_listing(&self, id: &FoodId, patch: ListingPatch) -> StoreResult<usize> {
        let mut conn = acquire(&self.pool)?;

        // Diesel refuses an UPDATE with no assignments, so an all-None
        // patch degrades to an existence probe, matching the in-memory
        // adapter's contract.
        if patch.is_empty() {
            let n: i64 = food_items::table
                .filter(food_items::id.eq(id.to_string()))
                .count()
                .get_result(&mut conn)
                .map_err(|e| StoreError::Unavailable(e.to_string()))?;
            return Ok(usize::try_from(n).unwrap_or(0));
        }

        let changeset = Self::to_changeset(patch);
        diesel::update(food_items::table.find(id.to_string()))
            .set(&changeset)
            .execute(&mut conn)
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }

    async fn adjust_counters(
        &self,
        id: &FoodId,
        adjustment: CounterAdjustment,
    ) -> StoreResult<usize> {
        let mut conn = acquire(&self.pool)?;

        let assignments = (
            food_items::availability.eq(food_items::availability + adjustment.availability_delta),
            food_items::purchase_count
                .eq(food_items::purchase_count + adjustment.purchase_count_delta),
        );

        let modified = match adjustment.min_availability {
            Some(floor) => diesel::update(
                food_items::table
                    .filter(food_items::id.eq(id.to_string()))
                    .filter(food_items::availability.ge(floor)),
            )
            .set(assignments)
            .execute(&mut conn),
            None => diesel::update(food_items::table.filter(food_items::id.eq(id.to_string())))
                .set(assignments)
                .execute(&mut conn),
        }
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(modified)
    }
}

/// SQLite-backed purchase store.
pub struct SqlitePurchaseStore {
    /// Database connection pool.
    pool: DbPool,
}

impl SqlitePurchaseStore {
    /// Create a new purchase store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn to_row(
        id: PurchaseId,
        purchase: &NewPurchase,
        purchased_at: DateTime<Utc>,
    ) -> StoreResult<PurchaseRow> {
        let metadata = serde_json::to_string(&purchase.metadata)
            .map_err(|e| StoreError::Decode(format!("metadata: {e}")))?;
        Ok(PurchaseRow {
            id: id.to_string(),
            food_id: purchase.food_id.to_string(),
            customer_email: purchase.customer_email.clone(),
            quantity: purchase.quantity,
            metadata,
            purchased_at: purchased_at.to_rfc3339(),
        })
    }

    fn from_row(row: PurchaseRow) -> StoreResult<PurchaseRecord> {
        let id = PurchaseId::parse(&row.id)
            .map_err(|e| StoreError::Decode(format!("purchase id: {e}")))?;
        let food_id = FoodId::parse(&row.food_id)
            .map_err(|e| StoreError::Decode(format!("food id: {e}")))?;
        let metadata = serde_json::from_str(&row.metadata)
            .map_err(|e| StoreError::Decode(format!("metadata: {e}")))?;
        Ok(PurchaseRecord {
            id,
            food_id,
            customer_email: row.customer_email,
            quantity: row.quantity,
            metadata,
            purchased_at: parse_timestamp(&row.purchased_at)?,
        })
    }
}

impl PurchaseStore for SqlitePurchaseStore {
    async fn insert(&self, purchase: NewPurchase) -> StoreResult<PurchaseId> {
        let id = PurchaseId::generate();
        let row = Self::to_row(id, &purchase, Utc::now())?;
        let mut conn = acquire(&self.pool)?;

        diesel::insert_into(purchases::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(id)
    }

    async fn find(
        &self,
        id: &PurchaseId,
        customer_email: Option<&str>,
    ) -> StoreResult<Option<PurchaseRecord>> {
        let mut conn = acquire(&self.pool)?;

        let row: Option<PurchaseRow> = match customer_email {
            Some(email) => purchases::table
                .filter(purchases::id.eq(id.to_string()))
                .filter(purchases::customer_email.eq(email))
                .first(&mut conn)
                .optional(),
            None => purchases::table
                .find(id.to_string())
                .first(&mut conn)
                .optional(),
        }
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        row.map(Self::from_row).transpose()
    }

    async fn delete(&self, id: &PurchaseId, customer_email: Option<&str>) -> StoreResult<usize> {
        let mut conn = acquire(&self.pool)?;

        match customer_email {
            Some(email) => diesel::delete(
                purchases::table
                    .filter(purchases::id.eq(id.to_string()))
                    .filter(purchases::customer_email.eq(email)),
            )
            .execute(&mut conn),
            None => diesel::delete(purchases::table.filter(purchases::id.eq(id.to_string())))
                .execute(&mut conn),
        }
        .map_err(|e| StoreError::Unavailable(e.to_string()))
    }

    async fn list_for_customer(&self, customer_email: &str) -> StoreResult<Vec<PurchaseRecord>> {
        let mut conn = acquire(&self.pool)?;

        let rows: Vec<PurchaseRow> = purchases::table
            .filter(purchases::customer_email.eq(customer_email))
            .order(purchases::purchased_at.asc())
            .load(&mut conn)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        rows.into_iter().map(Self::from_row).collect()
    }
}
