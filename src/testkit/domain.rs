//! Builders for domain primitives used across tests.
//!
//! Provides concise factories for [`NewFoodItem`] and [`NewPurchase`]
//! with sensible defaults, so tests only spell out the fields they
//! actually assert on.

use rust_decimal::Decimal;
use serde_json::Value;

use crate::domain::food::{NewFoodItem, Vendor};
use crate::domain::id::FoodId;
use crate::domain::purchase::{NewPurchase, OrderMetadata};

/// Start building a food listing with test defaults.
pub fn food_item() -> FoodItemBuilder {
    FoodItemBuilder::default()
}

/// Start building a purchase with test defaults.
pub fn purchase() -> PurchaseBuilder {
    PurchaseBuilder::default()
}

/// Builder for [`NewFoodItem`] test fixtures.
pub struct FoodItemBuilder {
    name: String,
    image: String,
    price: Decimal,
    category: String,
    portion: String,
    availability: i64,
    origin: String,
    description: String,
    vendor_email: String,
    vendor_name: String,
}

impl Default for FoodItemBuilder {
    fn default() -> Self {
        Self {
            name: "Test Dish".to_string(),
            image: "https://img.example/dish.jpg".to_string(),
            price: Decimal::new(750, 2),
            category: "lunch".to_string(),
            portion: "1 plate".to_string(),
            availability: 10,
            origin: "Testland".to_string(),
            description: "A dish for tests".to_string(),
            vendor_email: "vendor@example.com".to_string(),
            vendor_name: "Test Vendor".to_string(),
        }
    }
}

impl FoodItemBuilder {
    /// Set the dish name.
    #[must_use]
    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Set the unit price.
    #[must_use]
    pub fn price(mut self, price: Decimal) -> Self {
        self.price = price;
        self
    }

    /// Set the initial stock.
    #[must_use]
    pub fn availability(mut self, availability: i64) -> Self {
        self.availability = availability;
        self
    }

    /// Set the vendor email (the self-purchase check keys on this).
    #[must_use]
    pub fn vendor_email(mut self, email: &str) -> Self {
        self.vendor_email = email.to_string();
        self
    }

    /// Finish the listing.
    #[must_use]
    pub fn build(self) -> NewFoodItem {
        NewFoodItem {
            name: self.name,
            image: self.image,
            price: self.price,
            category: self.category,
            portion: self.portion,
            availability: self.availability,
            origin: self.origin,
            description: self.description,
            added_by: Vendor::new(self.vendor_email, self.vendor_name),
        }
    }
}

/// Builder for [`NewPurchase`] test fixtures.
pub struct PurchaseBuilder {
    food_id: FoodId,
    customer_email: String,
    quantity: i64,
    metadata: OrderMetadata,
}

impl Default for PurchaseBuilder {
    fn default() -> Self {
        Self {
            food_id: FoodId::generate(),
            customer_email: "customer@example.com".to_string(),
            quantity: 1,
            metadata: OrderMetadata::new(),
        }
    }
}

impl PurchaseBuilder {
    /// Point the purchase at a specific listing.
    #[must_use]
    pub fn food_id(mut self, food_id: FoodId) -> Self {
        self.food_id = food_id;
        self
    }

    /// Set the purchasing customer.
    #[must_use]
    pub fn customer_email(mut self, email: &str) -> Self {
        self.customer_email = email.to_string();
        self
    }

    /// Set the purchased quantity.
    #[must_use]
    pub fn quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    /// Add one metadata entry.
    #[must_use]
    pub fn metadata_entry(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    /// Finish the purchase.
    #[must_use]
    pub fn build(self) -> NewPurchase {
        NewPurchase {
            food_id: self.food_id,
            customer_email: self.customer_email,
            quantity: self.quantity,
            metadata: self.metadata,
        }
    }
}
