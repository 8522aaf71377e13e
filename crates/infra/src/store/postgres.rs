//! Postgres-backed inventory store.
//!
//! The row lives in the externally managed `global_inventory` table (see
//! `schema/global_inventory.sql`). Reads inside a transaction take
//! `FOR UPDATE`, so two planners never see the same pre-conversion stock.
//!
//! ## Error Mapping
//!
//! | SQLx Error | StoreError |
//! |------------|------------|
//! | Any error while connecting, querying or committing | `Unavailable` |
//! | Query returned no row | `MissingInventory` |
//! | Column missing, wrong type, negative or above `u32::MAX` | `Corrupt` |

use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Postgres, Row, Transaction};
use tracing::instrument;

use potionshop_inventory::InventoryState;

use super::{InventoryStore, InventoryTransaction, StoreError};

const SELECT_FOR_UPDATE: &str = r#"
    SELECT
        num_red_ml::bigint AS num_red_ml,
        num_green_ml::bigint AS num_green_ml,
        num_blue_ml::bigint AS num_blue_ml,
        num_dark_ml::bigint AS num_dark_ml,
        num_red_potion::bigint AS num_red_potion,
        num_green_potion::bigint AS num_green_potion,
        num_blue_potion::bigint AS num_blue_potion,
        num_dark_potion::bigint AS num_dark_potion,
        gold::bigint AS gold
    FROM global_inventory
    LIMIT 1
    FOR UPDATE
"#;

// Single-row table: no WHERE clause. Gold is deliberately absent.
const UPDATE_STOCK: &str = r#"
    UPDATE global_inventory SET
        num_red_ml = $1,
        num_green_ml = $2,
        num_blue_ml = $3,
        num_dark_ml = $4,
        num_red_potion = $5,
        num_green_potion = $6,
        num_blue_potion = $7,
        num_dark_potion = $8
"#;

/// Postgres-backed store for the global inventory row.
///
/// Uses the SQLx connection pool, which is `Send + Sync`.
#[derive(Debug, Clone)]
pub struct PostgresInventoryStore {
    pool: PgPool,
}

impl PostgresInventoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `uri`, pinging connections before handing them out.
    pub async fn connect(uri: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .test_before_acquire(true)
            .connect(uri)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl InventoryStore for PostgresInventoryStore {
    #[instrument(skip(self), err)]
    async fn begin(&self) -> Result<Box<dyn InventoryTransaction + '_>, StoreError> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin_transaction", e))?;
        Ok(Box::new(PostgresInventoryTransaction { tx }))
    }
}

struct PostgresInventoryTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl InventoryTransaction for PostgresInventoryTransaction {
    #[instrument(skip(self), err)]
    async fn load_for_update(&mut self) -> Result<InventoryState, StoreError> {
        let row = sqlx::query(SELECT_FOR_UPDATE)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| map_sqlx_error("load_inventory", e))?
            .ok_or(StoreError::MissingInventory)?;

        row_to_state(&row)
    }

    #[instrument(skip(self, state), err)]
    async fn save(&mut self, state: &InventoryState) -> Result<(), StoreError> {
        let result = sqlx::query(UPDATE_STOCK)
            .bind(i64::from(state.num_red_ml))
            .bind(i64::from(state.num_green_ml))
            .bind(i64::from(state.num_blue_ml))
            .bind(i64::from(state.num_dark_ml))
            .bind(i64::from(state.num_red_potion))
            .bind(i64::from(state.num_green_potion))
            .bind(i64::from(state.num_blue_potion))
            .bind(i64::from(state.num_dark_potion))
            .execute(&mut *self.tx)
            .await
            .map_err(|e| map_sqlx_error("save_inventory", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::MissingInventory);
        }
        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let this = *self;
        this.tx
            .commit()
            .await
            .map_err(|e| map_sqlx_error("commit_transaction", e))
    }
}

fn row_to_state(row: &PgRow) -> Result<InventoryState, StoreError> {
    let col = |name: &'static str| -> Result<u32, StoreError> {
        let raw: i64 = row
            .try_get(name)
            .map_err(|e| StoreError::Corrupt(format!("{name}: {e}")))?;
        to_quantity(name, raw)
    };

    Ok(InventoryState {
        num_red_ml: col("num_red_ml")?,
        num_green_ml: col("num_green_ml")?,
        num_blue_ml: col("num_blue_ml")?,
        num_dark_ml: col("num_dark_ml")?,
        num_red_potion: col("num_red_potion")?,
        num_green_potion: col("num_green_potion")?,
        num_blue_potion: col("num_blue_potion")?,
        num_dark_potion: col("num_dark_potion")?,
        gold: col("gold")?,
    })
}

fn to_quantity(column: &'static str, raw: i64) -> Result<u32, StoreError> {
    u32::try_from(raw).map_err(|_| StoreError::Corrupt(format!("{column} out of range: {raw}")))
}

fn map_sqlx_error(operation: &'static str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let code = db_err.code().map(|c| c.into_owned()).unwrap_or_default();
            StoreError::unavailable(operation, format!("database error [{code}]: {}", db_err.message()))
        }
        sqlx::Error::PoolClosed => StoreError::unavailable(operation, "connection pool closed"),
        sqlx::Error::PoolTimedOut => StoreError::unavailable(operation, "timed out acquiring a connection"),
        other => StoreError::unavailable(operation, other.to_string()),
    }
}
