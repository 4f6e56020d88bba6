//! Service wiring over a chosen storage backend.
//!
//! Inbound adapters construct one [`AppContext`] per process and drive
//! every operation through it. The generic parameters keep the services
//! monomorphized over the concrete stores; handlers stay generic and do
//! not care which backend is underneath.

use std::path::Path;
use std::sync::Arc;

use crate::adapter::outbound::memory::{MemoryItemStore, MemoryJournal, MemoryPurchaseStore};
use crate::adapter::outbound::sqlite::database::connection::{create_pool, run_migrations};
use crate::adapter::outbound::sqlite::{SqliteItemStore, SqliteJournal, SqlitePurchaseStore};
use crate::error::Result;
use crate::port::outbound::{ItemStore, PurchaseStore, ReconciliationJournal};
use crate::service::{CatalogService, CheckoutManager};

/// The wired service graph for one storage backend.
pub struct AppContext<I, P> {
    pub checkout: CheckoutManager<I, P>,
    pub catalog: CatalogService<I>,
    pub journal: Arc<dyn ReconciliationJournal>,
}

/// Context over the SQLite adapter.
pub type SqliteContext = AppContext<SqliteItemStore, SqlitePurchaseStore>;

/// Context over the in-memory adapter.
pub type MemoryContext = AppContext<MemoryItemStore, MemoryPurchaseStore>;

impl<I, P> AppContext<I, P>
where
    I: ItemStore,
    P: PurchaseStore,
{
    fn assemble(
        items: Arc<I>,
        purchases: Arc<P>,
        journal: Arc<dyn ReconciliationJournal>,
    ) -> Self {
        Self {
            checkout: CheckoutManager::new(
                Arc::clone(&items),
                Arc::clone(&purchases),
                Arc::clone(&journal),
            ),
            catalog: CatalogService::new(items),
            journal,
        }
    }
}

impl SqliteContext {
    /// Open (or create) the database file, apply pending migrations, and
    /// wire every service on the shared pool.
    pub fn open_sqlite(database_path: &Path) -> Result<Self> {
        let url = database_path.to_string_lossy();
        let pool = create_pool(&url)?;
        run_migrations(&pool)?;

        let items = Arc::new(SqliteItemStore::new(pool.clone()));
        let purchases = Arc::new(SqlitePurchaseStore::new(pool.clone()));
        let journal: Arc<dyn ReconciliationJournal> = Arc::new(SqliteJournal::new(pool));
        Ok(Self::assemble(items, purchases, journal))
    }
}

impl MemoryContext {
    /// Wire every service on fresh in-memory collections. Nothing
    /// survives the process; useful for demos and tests.
    #[must_use]
    pub fn in_memory() -> Self {
        let items = Arc::new(MemoryItemStore::new());
        let purchases = Arc::new(MemoryPurchaseStore::new());
        let journal: Arc<dyn ReconciliationJournal> = Arc::new(MemoryJournal::new());
        Self::assemble(items, purchases, journal)
    }
}
