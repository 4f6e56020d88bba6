//! Catalog command handlers: add, show, and edit listings.

use serde_json::json;

use crate::adapter::inbound::cli::command::{AddFoodArgs, EditFoodArgs, FoodArgs};
use crate::adapter::inbound::cli::output;
use crate::app::AppContext;
use crate::domain::food::{FoodItem, ListingPatch, NewFoodItem, Vendor};
use crate::error::Result;
use crate::port::outbound::{ItemStore, PurchaseStore};

/// Execute `add-food`.
pub async fn add<I, P>(ctx: &AppContext<I, P>, args: AddFoodArgs) -> Result<()>
where
    I: ItemStore,
    P: PurchaseStore,
{
    let draft = NewFoodItem {
        name: args.name,
        image: args.image,
        price: args.price,
        category: args.category,
        portion: args.portion,
        availability: args.availability,
        origin: args.origin,
        description: args.description,
        added_by: Vendor::new(args.vendor_email, args.vendor_name),
    };

    let id = ctx.catalog.add_item(draft).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "add-food",
            "id": id.to_string(),
        }));
        return Ok(());
    }

    output::success("listing added");
    output::field("id", id);
    Ok(())
}

/// Execute `food`.
pub async fn show<I, P>(ctx: &AppContext<I, P>, args: FoodArgs) -> Result<()>
where
    I: ItemStore,
    P: PurchaseStore,
{
    if output::is_quiet() && !output::is_json() {
        return Ok(());
    }

    let item = ctx.catalog.item(&args.id).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "food",
            "item": serde_json::to_value(&item)?,
        }));
        return Ok(());
    }

    print_listing(&item);
    Ok(())
}

/// Execute `edit-food`.
pub async fn edit<I, P>(ctx: &AppContext<I, P>, args: EditFoodArgs) -> Result<()>
where
    I: ItemStore,
    P: PurchaseStore,
{
    let patch = ListingPatch {
        name: args.name,
        image: args.image,
        price: args.price,
        category: args.category,
        portion: args.portion,
        availability: args.availability,
        origin: args.origin,
        description: args.description,
    };
    let unchanged = patch.is_empty();

    ctx.catalog.update_listing(&args.id, patch).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "edit-food",
            "id": args.id,
            "changed": !unchanged,
        }));
        return Ok(());
    }

    if unchanged {
        output::note("no fields given; listing left as-is");
    } else {
        output::success("listing updated");
    }
    Ok(())
}

fn print_listing(item: &FoodItem) {
    output::section(&item.name);
    output::field("id", item.id);
    output::field("price", item.price);
    output::field("category", &item.category);
    output::field("portion", &item.portion);
    output::field("availability", item.availability);
    output::field("sold", item.purchase_count);
    if !item.origin.is_empty() {
        output::field("origin", &item.origin);
    }
    if !item.description.is_empty() {
        output::field("description", &item.description);
    }
    let vendor = if item.added_by.name.is_empty() {
        item.added_by.email.clone()
    } else {
        format!("{} <{}>", item.added_by.name, item.added_by.email)
    };
    output::field("vendor", vendor);
    output::field("added", item.created_at.to_rfc3339());
}
