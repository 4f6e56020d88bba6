//! Reconciliation incident listing.
//!
//! Incidents are purchases whose inventory adjustment never landed.
//! This is the operator's view of what still needs manual reconciling.

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::output;
use crate::app::AppContext;
use crate::error::Result;
use crate::port::outbound::{ItemStore, PurchaseStore};

#[derive(Tabled)]
struct IncidentRow {
    #[tabled(rename = "Recorded")]
    recorded: String,
    #[tabled(rename = "Order")]
    order: String,
    #[tabled(rename = "Food")]
    food: String,
    #[tabled(rename = "Stock")]
    stock: String,
    #[tabled(rename = "Sold")]
    sold: String,
    #[tabled(rename = "Cause")]
    cause: String,
}

/// Execute `incidents`.
pub async fn execute<I, P>(ctx: &AppContext<I, P>) -> Result<()>
where
    I: ItemStore,
    P: PurchaseStore,
{
    if output::is_quiet() && !output::is_json() {
        return Ok(());
    }

    let incidents = ctx.journal.list_open()?;

    if output::is_json() {
        output::json_output(json!({
            "command": "incidents",
            "incidents": serde_json::to_value(&incidents)?,
        }));
        return Ok(());
    }

    if incidents.is_empty() {
        output::success("no incidents recorded");
        return Ok(());
    }

    output::warning(&format!(
        "{} incident(s) awaiting reconciliation",
        incidents.len()
    ));

    let rows: Vec<IncidentRow> = incidents
        .iter()
        .map(|incident| IncidentRow {
            recorded: incident.occurred_at.to_rfc3339(),
            order: incident.purchase_id.to_string(),
            food: incident.food_id.to_string(),
            stock: format!("{:+}", incident.availability_delta),
            sold: format!("{:+}", incident.purchase_count_delta),
            cause: incident.cause.clone(),
        })
        .collect();

    let table = Table::new(rows).to_string();
    output::lines(&table);
    Ok(())
}
