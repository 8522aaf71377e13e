//! Bottling workflow: turns barrel liquid into potions against a store.

use tracing::{info, instrument};

use potionshop_core::DomainResult;
use potionshop_inventory::{plan_bottles, PotionComposition};

use crate::store::{InventoryStore, StoreError};

/// Plan the next bottling run and apply it to the inventory in one transaction.
///
/// The row is re-read under lock on every call, so repeated calls only ever
/// bottle liquid that is still unbottled. Any failure leaves the row as it was.
#[instrument(skip(store), err)]
pub async fn plan<S>(store: &S) -> Result<Vec<PotionComposition>, StoreError>
where
    S: InventoryStore + ?Sized,
{
    let mut tx = store.begin().await?;
    let current = tx.load_for_update().await?;
    let plan = plan_bottles(&current)?;

    if let Some(next) = &plan.next_state {
        tx.save(next).await?;
    }
    tx.commit().await?;

    info!(
        red_ml = current.num_red_ml,
        bottles = plan.bottles(),
        "bottle plan applied"
    );
    Ok(plan.compositions)
}

/// Acknowledge bottles delivered to the catalog.
///
/// Validates and logs the report, then discards it. This is an explicit no-op
/// on inventory: whether delivery should move stock is an open product
/// question, so nothing is persisted here until that is settled.
pub fn record_delivery(deliveries: &[PotionComposition]) -> DomainResult<()> {
    for delivery in deliveries {
        delivery.validate()?;
    }

    for delivery in deliveries {
        info!(
            potion_type = ?delivery.potion_type.0,
            quantity = delivery.quantity,
            "potions delivered"
        );
    }
    info!(
        lines = deliveries.len(),
        bottles = delivered_bottles(deliveries),
        "delivery recorded"
    );
    Ok(())
}

/// Bottles across a report, saturating at `i64::MAX`.
fn delivered_bottles(deliveries: &[PotionComposition]) -> i64 {
    deliveries
        .iter()
        .fold(0i64, |acc, d| acc.saturating_add(d.quantity))
}
