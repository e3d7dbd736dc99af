use stockscan_shared::{StockLevel, TransactionResult};

use crate::CoreResult;

pub const MISSING_PRODUCT_MESSAGE: &str = "No product specified in URL";

/// What the scan page shows. Starts in `Loading` and settles exactly once.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanState {
    Loading,
    Success(TransactionResult),
    LowStock(TransactionResult),
    Error(String),
}

impl ScanState {
    /// Initial state for a page opened with `product` taken from its URL.
    pub fn start(product: Option<&str>) -> Self {
        match product {
            Some(name) if !name.is_empty() => ScanState::Loading,
            _ => ScanState::Error(MISSING_PRODUCT_MESSAGE.to_string()),
        }
    }

    /// Settle a `Loading` page with the transaction outcome. Any other state
    /// is final and comes back unchanged.
    pub fn resolve(self, outcome: CoreResult<TransactionResult>) -> Self {
        if self != ScanState::Loading {
            return self;
        }

        match outcome {
            Ok(result) => match result.stock_level() {
                StockLevel::Success => ScanState::Success(result),
                StockLevel::LowStock => ScanState::LowStock(result),
            },
            Err(e) => ScanState::Error(e.to_string()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ScanState::Loading)
    }

    /// Only a failed page offers "Try Again"; a completed decrement does not.
    pub fn allows_retry(&self) -> bool {
        matches!(self, ScanState::Error(_))
    }

    pub fn result(&self) -> Option<&TransactionResult> {
        match self {
            ScanState::Success(r) | ScanState::LowStock(r) => Some(r),
            _ => None,
        }
    }
}
