//! Checkout command handlers: place and cancel orders.

use serde_json::json;

use crate::adapter::inbound::cli::command::{CancelArgs, PurchaseArgs};
use crate::adapter::inbound::cli::output;
use crate::app::AppContext;
use crate::domain::purchase::{OrderMetadata, PurchaseRequest};
use crate::error::Result;
use crate::port::outbound::{ItemStore, PurchaseStore};

/// Execute `purchase`.
pub async fn place<I, P>(ctx: &AppContext<I, P>, args: PurchaseArgs) -> Result<()>
where
    I: ItemStore,
    P: PurchaseStore,
{
    let metadata: OrderMetadata = args.metadata.into_iter().collect();
    let request =
        PurchaseRequest::new(args.food_id, args.email, args.quantity).with_metadata(metadata);

    let receipt = ctx.checkout.create_purchase(request).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "purchase",
            "order_id": receipt.purchase_id.to_string(),
            "food_id": receipt.food_id.to_string(),
            "quantity": receipt.quantity,
        }));
        return Ok(());
    }

    output::success(&format!("order placed for {} unit(s)", receipt.quantity));
    output::field("order", receipt.purchase_id);
    output::hint(&format!(
        "run {} to undo",
        output::highlight(format!("plateful cancel {}", receipt.purchase_id))
    ));
    Ok(())
}

/// Execute `cancel`.
pub async fn cancel<I, P>(ctx: &AppContext<I, P>, args: CancelArgs) -> Result<()>
where
    I: ItemStore,
    P: PurchaseStore,
{
    let receipt = ctx
        .checkout
        .cancel_purchase(&args.order_id, args.email.as_deref())
        .await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "cancel",
            "order_id": receipt.purchase_id.to_string(),
            "food_id": receipt.food_id.to_string(),
            "quantity": receipt.quantity,
        }));
        return Ok(());
    }

    output::success(&format!(
        "order cancelled, {} unit(s) restocked",
        receipt.quantity
    ));
    Ok(())
}
