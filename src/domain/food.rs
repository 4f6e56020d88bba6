//! Food listing types and the atomic counter adjustment.
//!
//! A [`FoodItem`] is the catalog's unit of sale. Two of its fields move
//! after creation: `availability` (units still in stock) and
//! `purchase_count` (units ever sold). Checkout never writes those fields
//! directly; it describes the change as a [`CounterAdjustment`] and lets
//! the store apply it as a single conditional operation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::id::FoodId;

/// Vendor identity embedded in a listing (serialized as `addedBy`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vendor {
    /// Vendor account email, used for the self-purchase check.
    pub email: String,
    /// Display name shown alongside the listing.
    pub name: String,
}

impl Vendor {
    /// Create a new vendor identity.
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
        }
    }
}

/// A food listing as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    /// Store-assigned identity.
    pub id: FoodId,
    /// Dish name.
    pub name: String,
    /// Image URL for the listing.
    pub image: String,
    /// Unit price.
    pub price: Decimal,
    /// Cuisine category (e.g. "breakfast", "dessert").
    pub category: String,
    /// Portion descriptor such as "2 pieces". Not a count; the numeric
    /// stock lives in `availability`.
    #[serde(rename = "quantity")]
    pub portion: String,
    /// Units currently in stock. Decremented by every purchase.
    pub availability: i64,
    /// Country or region of origin.
    pub origin: String,
    /// Long-form listing description.
    pub description: String,
    /// The vendor who listed the item.
    #[serde(rename = "addedBy")]
    pub added_by: Vendor,
    /// Units ever sold. Incremented by every purchase.
    #[serde(rename = "purchaseCount")]
    pub purchase_count: i64,
    /// When the listing was created.
    pub created_at: DateTime<Utc>,
}

impl FoodItem {
    /// Whether `quantity` units can be sold from the current stock.
    #[must_use]
    pub fn can_cover(&self, quantity: i64) -> bool {
        self.availability >= quantity
    }

    /// Whether the given email belongs to the vendor of this listing.
    #[must_use]
    pub fn is_listed_by(&self, email: &str) -> bool {
        self.added_by.email == email
    }
}

/// Vendor-supplied fields for a brand new listing.
///
/// Deliberately has no counter for units sold: a fresh listing always
/// starts at zero and only checkout moves it from there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFoodItem {
    /// Dish name.
    pub name: String,
    /// Image URL for the listing.
    pub image: String,
    /// Unit price.
    pub price: Decimal,
    /// Cuisine category.
    pub category: String,
    /// Portion descriptor such as "2 pieces".
    #[serde(rename = "quantity")]
    pub portion: String,
    /// Initial units in stock.
    pub availability: i64,
    /// Country or region of origin.
    pub origin: String,
    /// Long-form listing description.
    pub description: String,
    /// The vendor creating the listing.
    #[serde(rename = "addedBy")]
    pub added_by: Vendor,
}

/// Vendor-editable fields of an existing listing.
///
/// `None` leaves a field untouched. The sale counters are not part of
/// this set; they only move through [`CounterAdjustment`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingPatch {
    /// New dish name.
    pub name: Option<String>,
    /// New image URL.
    pub image: Option<String>,
    /// New unit price.
    pub price: Option<Decimal>,
    /// New cuisine category.
    pub category: Option<String>,
    /// New portion descriptor.
    #[serde(rename = "quantity")]
    pub portion: Option<String>,
    /// New stock level. This is an absolute overwrite by the vendor, not
    /// an adjustment relative to sales.
    pub availability: Option<i64>,
    /// New origin.
    pub origin: Option<String>,
    /// New description.
    pub description: Option<String>,
}

impl ListingPatch {
    /// Whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// A compound change to a listing's sale counters, applied by the store
/// as one atomic operation.
///
/// When `min_availability` is set, the store must apply the adjustment
/// only if the item's availability is at least that value at the moment
/// of the write. An adjustment that does not apply reports zero affected
/// rows rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterAdjustment {
    /// Signed change to `availability`.
    pub availability_delta: i64,
    /// Signed change to `purchase_count`.
    pub purchase_count_delta: i64,
    /// Stock floor the item must satisfy for the adjustment to apply.
    pub min_availability: Option<i64>,
}

impl CounterAdjustment {
    /// Adjustment recording a sale of `quantity` units.
    ///
    /// Guarded by the stock floor so that concurrent sales can never push
    /// availability below zero.
    #[must_use]
    pub fn sale(quantity: i64) -> Self {
        Self {
            availability_delta: -quantity,
            purchase_count_delta: quantity,
            min_availability: Some(quantity),
        }
    }

    /// Exact inverse of a sale of `quantity` units, used when an order is
    /// cancelled. Unguarded: returned stock is always accepted.
    #[must_use]
    pub fn reversal(quantity: i64) -> Self {
        Self {
            availability_delta: quantity,
            purchase_count_delta: -quantity,
            min_availability: None,
        }
    }
}
