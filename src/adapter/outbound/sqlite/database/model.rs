//! Database model types for Diesel ORM.
//!
//! Rows are deliberately stringly typed: identifiers, money, and
//! timestamps all travel as TEXT and are decoded at the store boundary.

use diesel::prelude::*;

use super::schema::{food_items, incidents, purchases};

/// Database row for a food listing.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = food_items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct FoodItemRow {
    pub id: String,
    pub name: String,
    pub image: String,
    pub price: String,
    pub category: String,
    pub portion: String,
    pub availability: i64,
    pub origin: String,
    pub description: String,
    pub added_by_email: String,
    pub added_by_name: String,
    pub purchase_count: i64,
    pub created_at: String,
}

/// Changeset for the vendor-editable subset of a listing.
///
/// `None` fields are omitted from the generated UPDATE, which is what
/// gives the patch its "overwrite only what was named" behavior.
#[derive(AsChangeset, Debug, Clone, Default)]
#[diesel(table_name = food_items)]
pub struct ListingChangeset {
    pub name: Option<String>,
    pub image: Option<String>,
    pub price: Option<String>,
    pub category: Option<String>,
    pub portion: Option<String>,
    pub availability: Option<i64>,
    pub origin: Option<String>,
    pub description: Option<String>,
}

/// Database row for a purchase record.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = purchases)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PurchaseRow {
    pub id: String,
    pub food_id: String,
    pub customer_email: String,
    pub quantity: i64,
    pub metadata: String,
    pub purchased_at: String,
}

/// Database row for a reconciliation incident.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = incidents)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct IncidentRow {
    pub id: String,
    pub purchase_id: String,
    pub food_id: String,
    pub availability_delta: i64,
    pub purchase_count_delta: i64,
    pub cause: String,
    pub occurred_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::sqlite::database::connection::{create_pool, run_migrations};

    fn sample_food_row() -> FoodItemRow {
        FoodItemRow {
            id: "11111111-2222-3333-4444-555555555555".to_string(),
            name: "Khachapuri".to_string(),
            image: "https://img.example/khachapuri.jpg".to_string(),
            price: "12.50".to_string(),
            category: "dinner".to_string(),
            portion: "1 boat".to_string(),
            availability: 6,
            origin: "Georgia".to_string(),
            description: "Cheese bread".to_string(),
            added_by_email: "chef@example.com".to_string(),
            added_by_name: "Chef Nino".to_string(),
            purchase_count: 0,
            created_at: "2026-08-10T09:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn food_item_row_roundtrip_with_db() {
        let pool = create_pool(":memory:").unwrap();
        run_migrations(&pool).unwrap();
        let mut conn = pool.get().unwrap();

        let row = sample_food_row();
        diesel::insert_into(food_items::table)
            .values(&row)
            .execute(&mut conn)
            .unwrap();

        let loaded: FoodItemRow = food_items::table.find(&row.id).first(&mut conn).unwrap();
        assert_eq!(loaded.name, "Khachapuri");
        assert_eq!(loaded.price, "12.50");
        assert_eq!(loaded.availability, 6);
        assert_eq!(loaded.purchase_count, 0);
    }

    #[test]
    fn purchase_row_roundtrip_with_db() {
        let pool = create_pool(":memory:").unwrap();
        run_migrations(&pool).unwrap();
        let mut conn = pool.get().unwrap();

        let row = PurchaseRow {
            id: "aaaaaaaa-bbbb-cccc-dddd-eeeeeeeeeeee".to_string(),
            food_id: "11111111-2222-3333-4444-555555555555".to_string(),
            customer_email: "maya@example.com".to_string(),
            quantity: 2,
            metadata: r#"{"deliveryNote":"ring twice"}"#.to_string(),
            purchased_at: "2026-08-10T10:30:00+00:00".to_string(),
        };
        diesel::insert_into(purchases::table)
            .values(&row)
            .execute(&mut conn)
            .unwrap();

        let loaded: PurchaseRow = purchases::table.find(&row.id).first(&mut conn).unwrap();
        assert_eq!(loaded.customer_email, "maya@example.com");
        assert_eq!(loaded.quantity, 2);
        assert!(loaded.metadata.contains("deliveryNote"));
    }

    #[test]
    fn incident_row_roundtrip_with_db() {
        let pool = create_pool(":memory:").unwrap();
        run_migrations(&pool).unwrap();
        let mut conn = pool.get().unwrap();

        let row = IncidentRow {
            id: "99999999-8888-7777-6666-555555555555".to_string(),
            purchase_id: "aaaaaaaa-bbbb-cccc-dddd-eeeeeeeeeeee".to_string(),
            food_id: "11111111-2222-3333-4444-555555555555".to_string(),
            availability_delta: 2,
            purchase_count_delta: -2,
            cause: "inventory restore failed: store unavailable".to_string(),
            occurred_at: "2026-08-10T10:31:00+00:00".to_string(),
        };
        diesel::insert_into(incidents::table)
            .values(&row)
            .execute(&mut conn)
            .unwrap();

        let loaded: IncidentRow = incidents::table.find(&row.id).first(&mut conn).unwrap();
        assert_eq!(loaded.availability_delta, 2);
        assert_eq!(loaded.purchase_count_delta, -2);
        assert!(loaded.cause.contains("restore failed"));
    }

    #[test]
    fn empty_listing_changeset_has_no_fields_set() {
        let changeset = ListingChangeset::default();
        assert!(changeset.name.is_none());
        assert!(changeset.availability.is_none());
    }

    #[test]
    fn purchase_row_with_unicode_metadata_roundtrips() {
        let pool = create_pool(":memory:").unwrap();
        run_migrations(&pool).unwrap();
        let mut conn = pool.get().unwrap();

        let row = PurchaseRow {
            id: "00000000-0000-0000-0000-000000000001".to_string(),
            food_id: "00000000-0000-0000-0000-000000000002".to_string(),
            customer_email: "maya@example.com".to_string(),
            quantity: 1,
            metadata: r#"{"note":"extra harissa 🌶️, s'il vous plaît"}"#.to_string(),
            purchased_at: "2026-08-10T10:30:00+00:00".to_string(),
        };
        diesel::insert_into(purchases::table)
            .values(&row)
            .execute(&mut conn)
            .unwrap();

        let loaded: PurchaseRow = purchases::table.find(&row.id).first(&mut conn).unwrap();
        assert!(loaded.metadata.contains("🌶️"));
    }
}
