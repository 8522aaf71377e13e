//! Transactional access to the global inventory row.
//!
//! Callers open a transaction, read the row (locked until the transaction
//! ends), optionally write it back and commit. Dropping a transaction without
//! committing rolls it back.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use potionshop_core::DomainError;
use potionshop_inventory::InventoryState;

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryInventoryStore;
pub use postgres::PostgresInventoryStore;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached or refused the operation; nothing was kept.
    #[error("inventory store unavailable during {operation}: {message}")]
    Unavailable {
        operation: &'static str,
        message: String,
    },

    #[error("global inventory row is missing")]
    MissingInventory,

    /// A persisted value does not fit the domain (e.g. negative stock).
    #[error("corrupt inventory row: {0}")]
    Corrupt(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl StoreError {
    pub fn unavailable(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Unavailable {
            operation,
            message: message.into(),
        }
    }
}

/// Handle to wherever the inventory row lives.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn InventoryTransaction + '_>, StoreError>;
}

/// One open transaction over the inventory row.
#[async_trait]
pub trait InventoryTransaction: Send {
    /// Read the current row and hold a write lock on it until commit/rollback.
    async fn load_for_update(&mut self) -> Result<InventoryState, StoreError>;

    /// Write liquid and potion columns. Gold is never written here.
    async fn save(&mut self, state: &InventoryState) -> Result<(), StoreError>;

    async fn commit(self: Box<Self>) -> Result<(), StoreError>;
}

#[async_trait]
impl<S> InventoryStore for Arc<S>
where
    S: InventoryStore + ?Sized,
{
    async fn begin(&self) -> Result<Box<dyn InventoryTransaction + '_>, StoreError> {
        (**self).begin().await
    }
}
