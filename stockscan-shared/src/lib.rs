pub mod models;

pub use models::product::{ProductRecord, RecordUpdate};
pub use models::transaction::{StockLevel, TransactionResult, LOW_STOCK_THRESHOLD};
