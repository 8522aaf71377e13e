//! Postgres round trips for the inventory store.
//!
//! Runs only when `TEST_POSTGRES_URI` points at a scratch database; each test
//! works inside its own schema so runs do not interfere.

use std::time::{SystemTime, UNIX_EPOCH};

use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};

use potionshop_infra::bottler;
use potionshop_infra::store::{InventoryStore, PostgresInventoryStore, StoreError};
use potionshop_inventory::PotionType;

const SCHEMA_SQL: &str = include_str!("../../../schema/global_inventory.sql");

async fn scratch_pool(tag: &str) -> Option<PgPool> {
    let uri = std::env::var("TEST_POSTGRES_URI").ok()?;
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    let schema = format!("bottler_{tag}_{nanos}");

    let setup = PgPool::connect(&uri).await.unwrap();
    setup
        .execute(format!("CREATE SCHEMA {schema}").as_str())
        .await
        .unwrap();
    setup.close().await;

    let search_path = format!("SET search_path TO {schema}");
    let pool = PgPoolOptions::new()
        .max_connections(4)
        .after_connect(move |conn, _meta| {
            let search_path = search_path.clone();
            Box::pin(async move {
                conn.execute(search_path.as_str()).await?;
                Ok(())
            })
        })
        .connect(&uri)
        .await
        .unwrap();

    pool.execute(SCHEMA_SQL).await.unwrap();
    Some(pool)
}

async fn red_stock(pool: &PgPool) -> (i32, i32, i32) {
    sqlx::query_as("SELECT num_red_ml, num_red_potion, gold FROM global_inventory")
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn plan_converts_and_persists() {
    let Some(pool) = scratch_pool("plan").await else {
        return;
    };
    sqlx::query("UPDATE global_inventory SET num_red_ml = 250")
        .execute(&pool)
        .await
        .unwrap();

    let store = PostgresInventoryStore::new(pool.clone());
    let out = bottler::plan(&store).await.unwrap();

    assert_eq!(out.len(), 1);
    assert_eq!(out[0].potion_type, PotionType([100, 0, 0, 0]));
    assert_eq!(out[0].quantity, 2);
    assert_eq!(red_stock(&pool).await, (50, 2, 100));
}

#[tokio::test]
async fn concurrent_plans_serialize_on_row_lock() {
    let Some(pool) = scratch_pool("concurrent").await else {
        return;
    };
    sqlx::query("UPDATE global_inventory SET num_red_ml = 450")
        .execute(&pool)
        .await
        .unwrap();

    let store = PostgresInventoryStore::new(pool.clone());
    let (a, b) = tokio::join!(bottler::plan(&store), bottler::plan(&store));

    let total = a.unwrap()[0].quantity + b.unwrap()[0].quantity;
    assert_eq!(total, 4);
    assert_eq!(red_stock(&pool).await, (50, 4, 100));
}

#[tokio::test]
async fn missing_row_is_reported() {
    let Some(pool) = scratch_pool("missing").await else {
        return;
    };
    sqlx::query("DELETE FROM global_inventory")
        .execute(&pool)
        .await
        .unwrap();

    let store = PostgresInventoryStore::new(pool);
    let mut tx = store.begin().await.unwrap();
    let err = tx.load_for_update().await.unwrap_err();
    assert_eq!(err, StoreError::MissingInventory);
}
