use async_trait::async_trait;
use stockscan_shared::{ProductRecord, RecordUpdate};

/// Failure talking to the inventory store. Both variants carry the store's
/// raw error text.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("Inventory store query failed: {0}")]
    Lookup(String),
    #[error("Inventory store update failed: {0}")]
    Update(String),
}

/// Remote structured-data store holding product records.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// First record whose title equals `name` exactly, if any.
    async fn find_by_name(&self, name: &str) -> Result<Option<ProductRecord>, StoreError>;

    /// Partial update of the record identified by `id`.
    async fn apply_update(&self, id: &str, update: &RecordUpdate) -> Result<(), StoreError>;
}
