use chrono::{DateTime, Utc};
use stockscan_shared::{ProductRecord, RecordUpdate, StockLevel, TransactionResult};
use tracing::{error, info, warn};

use crate::repository::InventoryStore;
use crate::{CoreError, CoreResult};

/// New counter values for one scan of `record`.
///
/// Quantity is clamped at zero, but both consumption counters advance even
/// when nothing was left on hand. Out-of-range store values saturate rather
/// than overflow.
pub fn compute_update(record: &ProductRecord, now: DateTime<Utc>) -> RecordUpdate {
    RecordUpdate {
        quantity: record.quantity.saturating_sub(1).max(0),
        total_consumed: record.total_consumed.saturating_add(1),
        monthly_consumed: record.monthly_consumed.saturating_add(1),
        last_consumed_at: now,
    }
}

pub fn classify(new_quantity: i64) -> StockLevel {
    StockLevel::from_quantity(new_quantity)
}

/// Look up `name`, decrement it by one and write the counters back.
///
/// Exactly one write is issued when the record exists. The read and the
/// write are not atomic: two concurrent scans of the same product may both
/// write the same quantity. A failed write is not rolled back.
#[tracing::instrument(name = "perform_decrement", skip(store, now))]
pub async fn perform_decrement(
    store: &dyn InventoryStore,
    name: &str,
    now: DateTime<Utc>,
) -> CoreResult<TransactionResult> {
    if name.is_empty() {
        return Err(CoreError::MissingProduct);
    }

    let record = store
        .find_by_name(name)
        .await
        .map_err(|e| {
            error!("Lookup failed: {}", e);
            e
        })?
        .ok_or_else(|| {
            warn!("No record titled '{}'", name);
            CoreError::NotFound(name.to_string())
        })?;

    let update = compute_update(&record, now);

    store.apply_update(&record.id, &update).await.map_err(|e| {
        error!("Write-back to {} failed: {}", record.id, e);
        e
    })?;

    let result = TransactionResult {
        product_name: name.to_string(),
        previous_quantity: record.quantity,
        new_quantity: update.quantity,
        total_consumed: update.total_consumed,
        monthly_consumed: update.monthly_consumed,
        unit_price: record.unit_price,
        remaining_value: update.quantity as f64 * record.unit_price,
    };

    info!(
        "Stock for '{}' {} -> {} ({})",
        name,
        result.previous_quantity,
        result.new_quantity,
        result.stock_level().as_str()
    );

    Ok(result)
}
