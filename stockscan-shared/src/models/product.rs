use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One product's stock entry as held by the inventory store.
///
/// Records are only ever read and patched; this service never creates or
/// deletes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Opaque handle assigned by the store, used for the write-back.
    pub id: String,
    /// Display title. Lookups match on it exactly.
    pub name: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub total_consumed: i64,
    pub monthly_consumed: i64,
    pub last_consumed_at: Option<DateTime<Utc>>,
}

/// The four fields written back after a scan. Anything not listed here is
/// left untouched on the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordUpdate {
    pub quantity: i64,
    pub total_consumed: i64,
    pub monthly_consumed: i64,
    pub last_consumed_at: DateTime<Utc>,
}

impl ProductRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            quantity: 0,
            unit_price: 0.0,
            total_consumed: 0,
            monthly_consumed: 0,
            last_consumed_at: None,
        }
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_unit_price(mut self, unit_price: f64) -> Self {
        self.unit_price = unit_price;
        self
    }

    pub fn with_consumption(mut self, total: i64, monthly: i64) -> Self {
        self.total_consumed = total;
        self.monthly_consumed = monthly;
        self
    }

    /// Returns a copy of the record with `update` applied.
    pub fn patched(&self, update: &RecordUpdate) -> Self {
        Self {
            quantity: update.quantity,
            total_consumed: update.total_consumed,
            monthly_consumed: update.monthly_consumed,
            last_consumed_at: Some(update.last_consumed_at),
            ..self.clone()
        }
    }
}
