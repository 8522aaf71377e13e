use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::{Mutex, MutexGuard};

use potionshop_inventory::InventoryState;

use super::{InventoryStore, InventoryTransaction, StoreError};

/// In-memory inventory row for tests/dev.
///
/// A transaction holds the row's async mutex from `begin` until it is
/// committed or dropped, so concurrent transactions run one after another.
#[derive(Debug, Default)]
pub struct InMemoryInventoryStore {
    row: Mutex<InventoryState>,
    fail_next_commit: AtomicBool,
}

impl InMemoryInventoryStore {
    pub fn new(initial: InventoryState) -> Self {
        Self {
            row: Mutex::new(initial),
            fail_next_commit: AtomicBool::new(false),
        }
    }

    /// Committed state, waiting for any open transaction to finish.
    pub async fn snapshot(&self) -> InventoryState {
        *self.row.lock().await
    }

    /// Make the next commit fail as if the store dropped the connection.
    pub fn fail_next_commit(&self) {
        self.fail_next_commit.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl InventoryStore for InMemoryInventoryStore {
    async fn begin(&self) -> Result<Box<dyn InventoryTransaction + '_>, StoreError> {
        let guard = self.row.lock().await;
        let staged = *guard;
        Ok(Box::new(InMemoryTransaction {
            guard,
            staged,
            fail_commit: &self.fail_next_commit,
        }))
    }
}

struct InMemoryTransaction<'a> {
    guard: MutexGuard<'a, InventoryState>,
    staged: InventoryState,
    fail_commit: &'a AtomicBool,
}

#[async_trait]
impl InventoryTransaction for InMemoryTransaction<'_> {
    async fn load_for_update(&mut self) -> Result<InventoryState, StoreError> {
        Ok(self.staged)
    }

    async fn save(&mut self, state: &InventoryState) -> Result<(), StoreError> {
        self.staged = InventoryState {
            gold: self.staged.gold,
            ..*state
        };
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let mut tx = *self;
        if tx.fail_commit.swap(false, Ordering::SeqCst) {
            return Err(StoreError::unavailable("commit_transaction", "injected commit failure"));
        }
        *tx.guard = tx.staged;
        Ok(())
    }
}
