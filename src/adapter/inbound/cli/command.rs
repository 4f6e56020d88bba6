//! Command-line interface definitions.
//!
//! Defines the CLI structure for the plateful marketplace using `clap`.
//! Subcommands cover the vendor catalog (adding, inspecting, and editing
//! listings), the checkout flow (placing and cancelling orders), and two
//! read surfaces: a customer's order history and the reconciliation
//! incident log.

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Food marketplace checkout and inventory CLI
#[derive(Parser, Debug)]
#[command(name = "plateful")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the SQLite database file (overrides configuration)
    #[arg(long, global = true, value_name = "FILE")]
    pub db: Option<PathBuf>,

    /// Keep all state in memory; nothing is persisted
    #[arg(long, global = true)]
    pub memory: bool,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the plateful CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a food listing to the catalog
    AddFood(AddFoodArgs),

    /// Show a single food listing
    Food(FoodArgs),

    /// Edit fields of an existing listing
    EditFood(EditFoodArgs),

    /// Place an order against a listing
    Purchase(PurchaseArgs),

    /// Cancel an order and restore its stock
    Cancel(CancelArgs),

    /// List a customer's orders
    Orders(OrdersArgs),

    /// List recorded reconciliation incidents
    Incidents,
}

/// Arguments for the `add-food` subcommand.
///
/// The listing starts with zero units sold; only the fields given here
/// are under vendor control.
#[derive(Parser, Debug)]
pub struct AddFoodArgs {
    /// Dish name shown on the listing.
    pub name: String,

    /// Unit price, e.g. "7.50".
    #[arg(long)]
    pub price: Decimal,

    /// Cuisine category (e.g. "breakfast", "dessert").
    #[arg(long)]
    pub category: String,

    /// Units in stock.
    #[arg(long)]
    pub availability: i64,

    /// Email address of the vendor who owns the listing.
    #[arg(long)]
    pub vendor_email: String,

    /// Display name of the vendor.
    #[arg(long, default_value = "")]
    pub vendor_name: String,

    /// Portion descriptor (e.g. "2 pcs", "500 ml").
    #[arg(long, default_value = "1")]
    pub portion: String,

    /// Image URL for the listing.
    #[arg(long, default_value = "")]
    pub image: String,

    /// Country or region of origin.
    #[arg(long, default_value = "")]
    pub origin: String,

    /// Long-form description.
    #[arg(long, default_value = "")]
    pub description: String,
}

/// Arguments for the `food` subcommand.
#[derive(Parser, Debug)]
pub struct FoodArgs {
    /// Listing id.
    pub id: String,
}

/// Arguments for the `edit-food` subcommand.
///
/// Only the flags that are present end up in the update; everything else
/// keeps its stored value. The sold counter is not editable.
#[derive(Parser, Debug)]
pub struct EditFoodArgs {
    /// Listing id.
    pub id: String,

    /// New dish name.
    #[arg(long)]
    pub name: Option<String>,

    /// New image URL.
    #[arg(long)]
    pub image: Option<String>,

    /// New unit price.
    #[arg(long)]
    pub price: Option<Decimal>,

    /// New cuisine category.
    #[arg(long)]
    pub category: Option<String>,

    /// New portion descriptor.
    #[arg(long)]
    pub portion: Option<String>,

    /// New stock level (absolute, not relative).
    #[arg(long)]
    pub availability: Option<i64>,

    /// New origin.
    #[arg(long)]
    pub origin: Option<String>,

    /// New description.
    #[arg(long)]
    pub description: Option<String>,
}

/// Arguments for the `purchase` subcommand.
#[derive(Parser, Debug)]
pub struct PurchaseArgs {
    /// Listing id to order from.
    pub food_id: String,

    /// Email of the purchasing customer.
    #[arg(long)]
    pub email: String,

    /// Units to order.
    #[arg(long, default_value = "1")]
    pub quantity: i64,

    /// Extra order field as KEY=VALUE (value is parsed as JSON when
    /// possible, kept as a string otherwise). Repeatable.
    #[arg(long = "meta", value_name = "KEY=VALUE", value_parser = parse_meta_entry)]
    pub metadata: Vec<(String, serde_json::Value)>,
}

/// Arguments for the `cancel` subcommand.
#[derive(Parser, Debug)]
pub struct CancelArgs {
    /// Order id to cancel.
    pub order_id: String,

    /// Only cancel if the order was placed by this customer.
    #[arg(long)]
    pub email: Option<String>,
}

/// Arguments for the `orders` subcommand.
#[derive(Parser, Debug)]
pub struct OrdersArgs {
    /// Customer mailbox to list orders for.
    pub email: String,

    /// Acting identity; defaults to the mailbox owner. Order history is
    /// only served to its owner.
    #[arg(long, value_name = "EMAIL")]
    pub identity: Option<String>,
}

/// Parse one `--meta KEY=VALUE` entry.
///
/// The value side is decoded as JSON so numbers and booleans survive as
/// themselves; anything that does not parse stays a plain string.
fn parse_meta_entry(entry: &str) -> Result<(String, serde_json::Value), String> {
    let (key, raw) = entry
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got {entry:?}"))?;
    if key.is_empty() {
        return Err(format!("expected KEY=VALUE, got {entry:?}"));
    }

    let value = serde_json::from_str(raw)
        .unwrap_or_else(|_| serde_json::Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_command_factory_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_has_version() {
        let cmd = Cli::command();
        assert!(cmd.get_version().is_some());
    }

    #[test]
    fn cli_name() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_name(), "plateful");
    }

    #[test]
    fn parse_add_food() {
        let cli = Cli::try_parse_from([
            "plateful",
            "add-food",
            "Chicken Biryani",
            "--price",
            "8.25",
            "--category",
            "lunch",
            "--availability",
            "20",
            "--vendor-email",
            "chef@example.com",
        ])
        .unwrap();

        match cli.command {
            Commands::AddFood(args) => {
                assert_eq!(args.name, "Chicken Biryani");
                assert_eq!(args.availability, 20);
                assert_eq!(args.portion, "1");
                assert_eq!(args.vendor_name, "");
            }
            other => panic!("parsed into {other:?}"),
        }
    }

    #[test]
    fn add_food_requires_price() {
        let result = Cli::try_parse_from([
            "plateful",
            "add-food",
            "Toast",
            "--category",
            "breakfast",
            "--availability",
            "5",
            "--vendor-email",
            "chef@example.com",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_purchase_defaults_to_one_unit() {
        let cli = Cli::try_parse_from([
            "plateful",
            "purchase",
            "some-id",
            "--email",
            "diner@example.com",
        ])
        .unwrap();

        match cli.command {
            Commands::Purchase(args) => {
                assert_eq!(args.quantity, 1);
                assert!(args.metadata.is_empty());
            }
            other => panic!("parsed into {other:?}"),
        }
    }

    #[test]
    fn parse_purchase_metadata_entries() {
        let cli = Cli::try_parse_from([
            "plateful",
            "purchase",
            "some-id",
            "--email",
            "diner@example.com",
            "--meta",
            "note=extra spicy",
            "--meta",
            "table=12",
        ])
        .unwrap();

        match cli.command {
            Commands::Purchase(args) => {
                assert_eq!(
                    args.metadata,
                    vec![
                        ("note".to_string(), serde_json::json!("extra spicy")),
                        ("table".to_string(), serde_json::json!(12)),
                    ]
                );
            }
            other => panic!("parsed into {other:?}"),
        }
    }

    #[test]
    fn malformed_meta_entry_is_rejected() {
        let result = Cli::try_parse_from([
            "plateful",
            "purchase",
            "some-id",
            "--email",
            "diner@example.com",
            "--meta",
            "no-equals-sign",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_global_flags() {
        let cli =
            Cli::try_parse_from(["plateful", "--json", "--memory", "incidents"]).unwrap();
        assert!(cli.json);
        assert!(cli.memory);
        assert!(!cli.quiet);
        assert_eq!(cli.verbose, 0);
        assert!(matches!(cli.command, Commands::Incidents));
    }

    #[test]
    fn parse_edit_food_partial_flags() {
        let cli = Cli::try_parse_from([
            "plateful",
            "edit-food",
            "some-id",
            "--availability",
            "3",
        ])
        .unwrap();

        match cli.command {
            Commands::EditFood(args) => {
                assert_eq!(args.availability, Some(3));
                assert!(args.name.is_none());
                assert!(args.price.is_none());
            }
            other => panic!("parsed into {other:?}"),
        }
    }

    #[test]
    fn parse_orders_with_identity_override() {
        let cli = Cli::try_parse_from([
            "plateful",
            "orders",
            "diner@example.com",
            "--identity",
            "someone-else@example.com",
        ])
        .unwrap();

        match cli.command {
            Commands::Orders(args) => {
                assert_eq!(args.email, "diner@example.com");
                assert_eq!(args.identity.as_deref(), Some("someone-else@example.com"));
            }
            other => panic!("parsed into {other:?}"),
        }
    }

    #[test]
    fn meta_value_keeps_json_types() {
        let (key, value) = parse_meta_entry("count=3").unwrap();
        assert_eq!(key, "count");
        assert_eq!(value, serde_json::json!(3));

        let (_, value) = parse_meta_entry("flag=true").unwrap();
        assert_eq!(value, serde_json::json!(true));

        let (_, value) = parse_meta_entry("name=Rahim").unwrap();
        assert_eq!(value, serde_json::json!("Rahim"));
    }

    #[test]
    fn meta_value_may_contain_equals() {
        let (key, value) = parse_meta_entry("query=a=b").unwrap();
        assert_eq!(key, "query");
        assert_eq!(value, serde_json::json!("a=b"));
    }
}
