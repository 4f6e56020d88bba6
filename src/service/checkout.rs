//! Checkout service: purchase creation, cancellation, and history.
//!
//! The purchase store and the item store are written in two separate
//! steps with no transaction spanning them. This module owns the rules
//! that keep the two in agreement:
//!
//! - every purchase write is paired with one atomic counter adjustment
//!   on the listing, guarded by a stock floor on the sale side;
//! - when the second step cannot be completed, the first is compensated
//!   (the purchase record is deleted);
//! - when compensation itself fails, the divergence is journaled as an
//!   [`Incident`] and surfaced as [`CheckoutError::PartialFailure`].
//!
//! Validation is strictly ordered so that a request failing several
//! gates always reports the same one: reference shape, quantity,
//! existence, self-purchase, stock.

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, warn};

use crate::domain::food::CounterAdjustment;
use crate::domain::id::{FoodId, PurchaseId};
use crate::domain::identity::VerifiedIdentity;
use crate::domain::incident::Incident;
use crate::domain::purchase::{NewPurchase, PurchaseRecord, PurchaseRequest};
use crate::error::{CheckoutError, StoreError};
use crate::port::outbound::journal::ReconciliationJournal;
use crate::port::outbound::store::{ItemStore, PurchaseStore};

/// Outcome of a completed purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseReceipt {
    /// Identity of the new purchase record.
    pub purchase_id: PurchaseId,
    /// The listing that was debited.
    pub food_id: FoodId,
    /// Units sold.
    pub quantity: i64,
}

/// Outcome of a completed cancellation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CancelReceipt {
    /// Identity of the removed purchase record.
    pub purchase_id: PurchaseId,
    /// The listing whose stock was restored.
    pub food_id: FoodId,
    /// Units returned to stock.
    pub quantity: i64,
}

/// Orchestrates the two-store purchase flow.
pub struct CheckoutManager<I, P> {
    items: Arc<I>,
    purchases: Arc<P>,
    journal: Arc<dyn ReconciliationJournal>,
}

impl<I, P> CheckoutManager<I, P>
where
    I: ItemStore,
    P: PurchaseStore,
{
    /// Create a checkout manager over the given stores and journal.
    pub fn new(items: Arc<I>, purchases: Arc<P>, journal: Arc<dyn ReconciliationJournal>) -> Self {
        Self {
            items,
            purchases,
            journal,
        }
    }

    /// Record a purchase and debit the listing's counters.
    ///
    /// On success the purchase record exists and the listing's
    /// availability has dropped by exactly the purchased quantity. On any
    /// error except [`CheckoutError::PartialFailure`] the stores are
    /// unchanged relative to before the call.
    pub async fn create_purchase(
        &self,
        request: PurchaseRequest,
    ) -> Result<PurchaseReceipt, CheckoutError> {
        let food_id = FoodId::parse(&request.food_id)?;

        let quantity = request.quantity;
        if quantity <= 0 {
            return Err(CheckoutError::InvalidQuantity { quantity });
        }

        let item = self
            .items
            .get(&food_id)
            .await?
            .ok_or(CheckoutError::NotFound {
                entity: "food item",
            })?;

        if item.is_listed_by(&request.customer_email) {
            warn!(food_id = %food_id, "Vendor attempted to purchase own listing");
            return Err(CheckoutError::SelfPurchaseForbidden);
        }

        if !item.can_cover(quantity) {
            return Err(CheckoutError::InsufficientStock {
                requested: quantity,
            });
        }

        let new_purchase = NewPurchase {
            food_id,
            customer_email: request.customer_email,
            quantity,
            metadata: request.metadata,
        };
        let purchase_id = match self.purchases.insert(new_purchase).await {
            Ok(id) => id,
            // No identity means no record to compensate; the listing was
            // never touched either.
            Err(StoreError::WriteUnacknowledged) => return Err(CheckoutError::WriteFailed),
            Err(e) => return Err(CheckoutError::StoreUnavailable(e)),
        };

        let adjustment = CounterAdjustment::sale(quantity);
        match self.items.adjust_counters(&food_id, adjustment).await {
            Ok(n) if n > 0 => {
                info!(
                    purchase_id = %purchase_id,
                    food_id = %food_id,
                    quantity,
                    "Purchase completed"
                );
                Ok(PurchaseReceipt {
                    purchase_id,
                    food_id,
                    quantity,
                })
            }
            // The stock floor failed under concurrency (or the listing
            // vanished). The purchase record must not survive.
            Ok(_) => match self.purchases.delete(&purchase_id, None).await {
                Ok(_) => {
                    warn!(
                        purchase_id = %purchase_id,
                        food_id = %food_id,
                        quantity,
                        "Stock floor rejected sale; purchase rolled back"
                    );
                    Err(CheckoutError::InsufficientStock {
                        requested: quantity,
                    })
                }
                Err(delete_err) => Err(self.journal_divergence(
                    purchase_id,
                    food_id,
                    &adjustment,
                    format!(
                        "stock floor rejected sale and compensating delete failed: {delete_err}"
                    ),
                )),
            },
            Err(adjust_err) => match self.purchases.delete(&purchase_id, None).await {
                Ok(_) => {
                    warn!(
                        purchase_id = %purchase_id,
                        food_id = %food_id,
                        error = %adjust_err,
                        "Inventory debit failed; purchase rolled back"
                    );
                    Err(CheckoutError::StoreUnavailable(adjust_err))
                }
                Err(delete_err) => Err(self.journal_divergence(
                    purchase_id,
                    food_id,
                    &adjustment,
                    format!(
                        "inventory debit failed ({adjust_err}) and compensating delete failed: {delete_err}"
                    ),
                )),
            },
        }
    }

    /// Cancel a purchase and restore the listing's counters.
    ///
    /// When `customer_email` is given, an order owned by someone else is
    /// indistinguishable from a missing order. The purchase record is
    /// deleted first; if the stock restore then cannot be applied, the
    /// cancellation stands and the divergence is journaled rather than
    /// resurrecting the order.
    pub async fn cancel_purchase(
        &self,
        reference: &str,
        customer_email: Option<&str>,
    ) -> Result<CancelReceipt, CheckoutError> {
        let purchase_id = PurchaseId::parse(reference)?;

        let record = self
            .purchases
            .find(&purchase_id, customer_email)
            .await?
            .ok_or(CheckoutError::NotFound { entity: "order" })?;
        let food_id = record.food_id;
        let quantity = record.quantity;

        let deleted = self.purchases.delete(&purchase_id, customer_email).await?;
        if deleted == 0 {
            // Raced with another cancellation; nothing was changed here.
            return Err(CheckoutError::NotFound { entity: "order" });
        }

        let adjustment = CounterAdjustment::reversal(quantity);
        match self.items.adjust_counters(&food_id, adjustment).await {
            Ok(n) if n > 0 => {
                info!(
                    purchase_id = %purchase_id,
                    food_id = %food_id,
                    quantity,
                    "Purchase cancelled"
                );
                Ok(CancelReceipt {
                    purchase_id,
                    food_id,
                    quantity,
                })
            }
            Ok(_) => Err(self.journal_divergence(
                purchase_id,
                food_id,
                &adjustment,
                "inventory restore matched no listing".to_string(),
            )),
            Err(adjust_err) => Err(self.journal_divergence(
                purchase_id,
                food_id,
                &adjustment,
                format!("inventory restore failed: {adjust_err}"),
            )),
        }
    }

    /// All purchases placed from the given mailbox, oldest first.
    ///
    /// The caller must own the mailbox; anyone else gets
    /// [`CheckoutError::Forbidden`] without the store being consulted.
    pub async fn purchases_for(
        &self,
        caller: &VerifiedIdentity,
        mailbox: &str,
    ) -> Result<Vec<PurchaseRecord>, CheckoutError> {
        if !caller.owns(mailbox) {
            warn!(mailbox, "Purchase history requested by non-owner");
            return Err(CheckoutError::Forbidden);
        }
        Ok(self.purchases.list_for_customer(mailbox).await?)
    }

    /// Journal a divergence and build the error that reports it.
    fn journal_divergence(
        &self,
        purchase_id: PurchaseId,
        food_id: FoodId,
        adjustment: &CounterAdjustment,
        cause: String,
    ) -> CheckoutError {
        error!(
            purchase_id = %purchase_id,
            food_id = %food_id,
            availability_delta = adjustment.availability_delta,
            cause = %cause,
            "Stores diverged; incident journaled"
        );
        let incident = Incident::unapplied(purchase_id, food_id, adjustment, cause);
        self.journal.record(&incident);
        CheckoutError::PartialFailure(Box::new(incident))
    }
}
