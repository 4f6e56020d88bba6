//! SQLite reconciliation journal.
//!
//! Incident writes are best-effort by contract: the checkout flow calls
//! [`record`](crate::port::outbound::journal::ReconciliationJournal::record)
//! while already handling a failure, so this adapter never propagates its
//! own errors upward. A failed journal write is logged at error level
//! with the full incident so the divergence is still recoverable from
//! the log stream.

use diesel::prelude::*;
use tracing::{error, warn};

use crate::adapter::outbound::sqlite::database::connection::{
    configure_sqlite_connection, DbPool,
};
use crate::adapter::outbound::sqlite::database::model::IncidentRow;
use crate::adapter::outbound::sqlite::database::schema::incidents;
use crate::domain::id::{FoodId, IncidentId, PurchaseId};
use crate::domain::incident::Incident;
use crate::error::{StoreError, StoreResult};
use crate::port::outbound::journal::ReconciliationJournal;

/// SQLite-backed incident journal.
pub struct SqliteJournal {
    /// Database connection pool.
    pool: DbPool,
}

impl SqliteJournal {
    /// Create a new journal with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn to_row(incident: &Incident) -> IncidentRow {
        IncidentRow {
            id: incident.id.to_string(),
            purchase_id: incident.purchase_id.to_string(),
            food_id: incident.food_id.to_string(),
            availability_delta: incident.availability_delta,
            purchase_count_delta: incident.purchase_count_delta,
            cause: incident.cause.clone(),
            occurred_at: incident.occurred_at.to_rfc3339(),
        }
    }

    fn from_row(row: IncidentRow) -> StoreResult<Incident> {
        let id = uuid::Uuid::parse_str(&row.id)
            .map(IncidentId::from)
            .map_err(|e| StoreError::Decode(format!("incident id: {e}")))?;
        let purchase_id = PurchaseId::parse(&row.purchase_id)
            .map_err(|e| StoreError::Decode(format!("purchase id: {e}")))?;
        let food_id = FoodId::parse(&row.food_id)
            .map_err(|e| StoreError::Decode(format!("food id: {e}")))?;
        let occurred_at = chrono::DateTime::parse_from_rfc3339(&row.occurred_at)
            .map(|t| t.with_timezone(&chrono::Utc))
            .map_err(|e| StoreError::Decode(format!("timestamp {:?}: {e}", row.occurred_at)))?;
        Ok(Incident {
            id,
            purchase_id,
            food_id,
            availability_delta: row.availability_delta,
            purchase_count_delta: row.purchase_count_delta,
            cause: row.cause,
            occurred_at,
        })
    }
}

impl ReconciliationJournal for SqliteJournal {
    fn record(&self, incident: &Incident) {
        let row = Self::to_row(incident);
        let mut conn = match self.pool.get() {
            Ok(conn) => conn,
            Err(e) => {
                error!(
                    incident = ?incident,
                    error = %e,
                    "Could not reach journal; incident preserved in log only"
                );
                return;
            }
        };
        // Incidents are written while a checkout is mid-failure, so this
        // connection contends with the store's own writes.
        if let Err(e) = configure_sqlite_connection(&mut conn) {
            warn!(error = %e, "failed to configure sqlite connection");
        }
        if let Err(e) = diesel::insert_into(incidents::table)
            .values(&row)
            .execute(&mut conn)
        {
            error!(
                incident = ?incident,
                error = %e,
                "Journal write failed; incident preserved in log only"
            );
        }
    }

    fn list_open(&self) -> StoreResult<Vec<Incident>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let rows: Vec<IncidentRow> = incidents::table
            .order(incidents::occurred_at.asc())
            .load(&mut conn)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        rows.into_iter().map(Self::from_row).collect()
    }
}
