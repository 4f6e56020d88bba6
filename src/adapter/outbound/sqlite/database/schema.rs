//! Diesel schema definitions, kept in lockstep with migrations/.

diesel::table! {
    food_items (id) {
        id -> Text,
        name -> Text,
        image -> Text,
        price -> Text,
        category -> Text,
        portion -> Text,
        availability -> BigInt,
        origin -> Text,
        description -> Text,
        added_by_email -> Text,
        added_by_name -> Text,
        purchase_count -> BigInt,
        created_at -> Text,
    }
}

diesel::table! {
    purchases (id) {
        id -> Text,
        food_id -> Text,
        customer_email -> Text,
        quantity -> BigInt,
        metadata -> Text,
        purchased_at -> Text,
    }
}

diesel::table! {
    incidents (id) {
        id -> Text,
        purchase_id -> Text,
        food_id -> Text,
        availability_delta -> BigInt,
        purchase_count_delta -> BigInt,
        cause -> Text,
        occurred_at -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(food_items, purchases, incidents);
