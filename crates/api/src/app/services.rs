use std::sync::Arc;

use potionshop_core::DomainResult;
use potionshop_infra::{
    bottler,
    config::ServiceConfig,
    store::{InMemoryInventoryStore, InventoryStore, PostgresInventoryStore, StoreError},
};
use potionshop_inventory::{InventoryState, PotionComposition};

/// Starting gold for a freshly provisioned shop.
const STARTING_GOLD: u32 = 100;

/// Operations the HTTP handlers call, bound to one inventory store.
#[derive(Clone)]
pub struct AppServices {
    store: Arc<dyn InventoryStore>,
}

impl AppServices {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    pub async fn plan_bottles(&self) -> Result<Vec<PotionComposition>, StoreError> {
        bottler::plan(self.store.as_ref()).await
    }

    pub fn record_delivery(&self, deliveries: &[PotionComposition]) -> DomainResult<()> {
        bottler::record_delivery(deliveries)
    }
}

/// Pick the inventory backend from configuration.
///
/// Without `POSTGRES_URI` the service runs on a fresh in-memory shop, which is
/// only useful for local development.
pub async fn build_store(config: &ServiceConfig) -> Result<Arc<dyn InventoryStore>, StoreError> {
    match &config.postgres_uri {
        Some(uri) => {
            let store = PostgresInventoryStore::connect(uri, config.db_max_connections).await?;
            tracing::info!(max_connections = config.db_max_connections, "using postgres inventory store");
            Ok(Arc::new(store))
        }
        None => {
            tracing::warn!("POSTGRES_URI not set; using in-memory inventory store");
            Ok(Arc::new(InMemoryInventoryStore::new(InventoryState {
                gold: STARTING_GOLD,
                ..InventoryState::default()
            })))
        }
    }
}
