pub mod repository;
pub mod memory;
pub mod transaction;
pub mod scan;

pub use repository::{InventoryStore, StoreError};
pub use memory::MemoryStore;
pub use transaction::{classify, compute_update, perform_decrement};
pub use scan::ScanState;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Missing 'product' parameter")]
    MissingProduct,
    #[error("Product '{0}' not found in database")]
    NotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type CoreResult<T> = Result<T, CoreError>;
