//! Application services - the checkout flow and catalog maintenance.

pub mod catalog;
pub mod checkout;

pub use catalog::CatalogService;
pub use checkout::{CancelReceipt, CheckoutManager, PurchaseReceipt};
