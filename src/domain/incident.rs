//! Reconciliation incidents.
//!
//! The purchase store and the catalog are written in two separate steps,
//! so a crash or store failure between them can leave the two out of
//! agreement. When the checkout flow detects that it could not restore
//! agreement on its own, it writes an [`Incident`] carrying the exact
//! counter change that never landed. An operator (or a future sweeper)
//! can replay that change to reconcile the stores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::food::CounterAdjustment;
use crate::domain::id::{FoodId, IncidentId, PurchaseId};

/// A cross-store divergence awaiting reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    /// Journal-assigned identity.
    pub id: IncidentId,
    /// The purchase record on the committed side of the divergence.
    pub purchase_id: PurchaseId,
    /// The food listing whose counters are out of agreement.
    pub food_id: FoodId,
    /// Signed availability change that never applied.
    pub availability_delta: i64,
    /// Signed purchase-count change that never applied.
    pub purchase_count_delta: i64,
    /// Human-readable account of how the divergence arose.
    pub cause: String,
    /// When the divergence was detected.
    pub occurred_at: DateTime<Utc>,
}

impl Incident {
    /// Record that `adjustment` should have been applied to `food_id` on
    /// behalf of `purchase_id` but was not.
    #[must_use]
    pub fn unapplied(
        purchase_id: PurchaseId,
        food_id: FoodId,
        adjustment: &CounterAdjustment,
        cause: impl Into<String>,
    ) -> Self {
        Self {
            id: IncidentId::generate(),
            purchase_id,
            food_id,
            availability_delta: adjustment.availability_delta,
            purchase_count_delta: adjustment.purchase_count_delta,
            cause: cause.into(),
            occurred_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unapplied_captures_the_missing_deltas() {
        let purchase_id = PurchaseId::generate();
        let food_id = FoodId::generate();
        let incident = Incident::unapplied(
            purchase_id,
            food_id,
            &CounterAdjustment::reversal(3),
            "inventory restore matched no listing",
        );
        assert_eq!(incident.purchase_id, purchase_id);
        assert_eq!(incident.food_id, food_id);
        assert_eq!(incident.availability_delta, 3);
        assert_eq!(incident.purchase_count_delta, -3);
        assert_eq!(incident.cause, "inventory restore matched no listing");
    }

    #[test]
    fn each_incident_gets_its_own_identity() {
        let purchase_id = PurchaseId::generate();
        let food_id = FoodId::generate();
        let a = Incident::unapplied(purchase_id, food_id, &CounterAdjustment::sale(1), "x");
        let b = Incident::unapplied(purchase_id, food_id, &CounterAdjustment::sale(1), "x");
        assert_ne!(a.id, b.id);
    }
}
