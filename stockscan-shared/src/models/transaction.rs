use serde::{Deserialize, Serialize};

/// At or below this many units a scan is reported as low stock.
pub const LOW_STOCK_THRESHOLD: i64 = 2;

/// Presentation class of a completed scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockLevel {
    Success,
    LowStock,
}

impl StockLevel {
    pub fn from_quantity(quantity: i64) -> Self {
        if quantity <= LOW_STOCK_THRESHOLD {
            StockLevel::LowStock
        } else {
            StockLevel::Success
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockLevel::Success => "success",
            StockLevel::LowStock => "low-stock",
        }
    }
}

/// Outcome of one scan. Built per request and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionResult {
    #[serde(rename = "product")]
    pub product_name: String,
    #[serde(rename = "oldQty")]
    pub previous_quantity: i64,
    #[serde(rename = "newQty")]
    pub new_quantity: i64,
    #[serde(rename = "totalConsumed")]
    pub total_consumed: i64,
    #[serde(rename = "monthlyConsumed")]
    pub monthly_consumed: i64,
    #[serde(rename = "price")]
    pub unit_price: f64,
    #[serde(rename = "value")]
    pub remaining_value: f64,
}

impl TransactionResult {
    pub fn stock_level(&self) -> StockLevel {
        StockLevel::from_quantity(self.new_quantity)
    }
}
