//! Purchase order types.
//!
//! A purchase is recorded as its own document, separate from the food
//! listing it debits. The two stores are only eventually consistent; the
//! checkout flow in [`crate::service::checkout`] owns the reconciliation
//! rules between them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::id::{FoodId, PurchaseId};

/// Free-form caller payload carried on a purchase record.
pub type OrderMetadata = Map<String, Value>;

/// A recorded purchase, as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    /// Store-assigned identity.
    pub id: PurchaseId,
    /// The food listing this purchase debits.
    pub food_id: FoodId,
    /// Email of the purchasing customer. Doubles as the ownership filter
    /// for cancellation and listing.
    #[serde(rename = "customerEmail")]
    pub customer_email: String,
    /// Units purchased. Always strictly positive.
    pub quantity: i64,
    /// Caller-supplied extras (delivery notes, display name, and the
    /// like), preserved verbatim.
    #[serde(flatten)]
    pub metadata: OrderMetadata,
    /// When the order was placed.
    pub purchased_at: DateTime<Utc>,
}

/// Fields of a purchase record the checkout flow supplies; the store
/// assigns identity and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPurchase {
    /// The food listing being purchased.
    pub food_id: FoodId,
    /// Email of the purchasing customer.
    pub customer_email: String,
    /// Units purchased.
    pub quantity: i64,
    /// Caller-supplied extras, preserved verbatim.
    pub metadata: OrderMetadata,
}

/// A checkout request exactly as the caller submitted it.
///
/// Nothing here is trusted: the food reference is a raw string and the
/// quantity may be non-positive. Validation happens in the checkout flow
/// so every caller goes through the same gates.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PurchaseRequest {
    /// Raw reference to the food listing.
    pub food_id: String,
    /// Email of the purchasing customer.
    #[serde(rename = "customerEmail")]
    pub customer_email: String,
    /// Requested units.
    pub quantity: i64,
    /// Any additional fields the caller sent.
    #[serde(flatten)]
    pub metadata: OrderMetadata,
}

impl PurchaseRequest {
    /// Create a request with no extra metadata.
    pub fn new(food_id: impl Into<String>, customer_email: impl Into<String>, quantity: i64) -> Self {
        Self {
            food_id: food_id.into(),
            customer_email: customer_email.into(),
            quantity,
            metadata: OrderMetadata::new(),
        }
    }

    /// Attach caller-supplied metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: OrderMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}
