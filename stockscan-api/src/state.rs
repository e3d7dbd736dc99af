use std::sync::Arc;
use stockscan_core::InventoryStore;

use crate::attempts::AttemptLedger;

pub const DEFAULT_ATTEMPT_CAPACITY: usize = 1024;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn InventoryStore>,
    pub attempts: Arc<AttemptLedger>,
}

impl AppState {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self::with_attempt_capacity(store, DEFAULT_ATTEMPT_CAPACITY)
    }

    pub fn with_attempt_capacity(store: Arc<dyn InventoryStore>, capacity: usize) -> Self {
        Self {
            store,
            attempts: Arc::new(AttemptLedger::new(capacity)),
        }
    }
}
