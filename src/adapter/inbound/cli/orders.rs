//! Customer order history listing.

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::OrdersArgs;
use crate::adapter::inbound::cli::output;
use crate::app::AppContext;
use crate::domain::identity::VerifiedIdentity;
use crate::error::Result;
use crate::port::outbound::{ItemStore, PurchaseStore};

#[derive(Tabled)]
struct OrderRow {
    #[tabled(rename = "Order")]
    id: String,
    #[tabled(rename = "Food")]
    food: String,
    #[tabled(rename = "Qty")]
    quantity: i64,
    #[tabled(rename = "Placed")]
    placed: String,
}

/// Execute `orders`.
pub async fn execute<I, P>(ctx: &AppContext<I, P>, args: OrdersArgs) -> Result<()>
where
    I: ItemStore,
    P: PurchaseStore,
{
    if output::is_quiet() && !output::is_json() {
        return Ok(());
    }

    // The identity flag stands in for the gateway's verified caller; it
    // defaults to the mailbox owner so local use just works.
    let identity = VerifiedIdentity::new(
        args.identity.unwrap_or_else(|| args.email.clone()),
    );
    let records = ctx.checkout.purchases_for(&identity, &args.email).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "orders",
            "customer": args.email,
            "orders": serde_json::to_value(&records)?,
        }));
        return Ok(());
    }

    if records.is_empty() {
        output::note("no orders on file");
        return Ok(());
    }

    output::section(&format!("Orders for {}", args.email));

    let rows: Vec<OrderRow> = records
        .iter()
        .map(|record| OrderRow {
            id: record.id.to_string(),
            food: record.food_id.to_string(),
            quantity: record.quantity,
            placed: record.purchased_at.to_rfc3339(),
        })
        .collect();

    let table = Table::new(rows).to_string();
    output::lines(&table);
    Ok(())
}
