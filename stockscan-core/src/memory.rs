use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use stockscan_shared::{ProductRecord, RecordUpdate};

use crate::repository::{InventoryStore, StoreError};

/// In-process inventory store keyed by record id.
///
/// Used to exercise the transaction and the HTTP handlers without a network.
/// Failures can be injected per operation.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, ProductRecord>>,
    lookup_failure: Mutex<Option<String>>,
    update_failure: Mutex<Option<String>>,
    lookups: AtomicUsize,
    updates: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = ProductRecord>) -> Self {
        let store = Self::new();
        for record in records {
            store.insert(record);
        }
        store
    }

    pub fn insert(&self, record: ProductRecord) {
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        records.insert(record.id.clone(), record);
    }

    pub fn get(&self, id: &str) -> Option<ProductRecord> {
        let records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        records.get(id).cloned()
    }

    pub fn fail_lookups(&self, message: impl Into<String>) {
        *self.lookup_failure.lock().unwrap_or_else(|e| e.into_inner()) = Some(message.into());
    }

    pub fn fail_updates(&self, message: impl Into<String>) {
        *self.update_failure.lock().unwrap_or_else(|e| e.into_inner()) = Some(message.into());
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn update_count(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InventoryStore for MemoryStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<ProductRecord>, StoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if let Some(msg) = self.lookup_failure.lock().unwrap_or_else(|e| e.into_inner()).clone() {
            return Err(StoreError::Lookup(msg));
        }

        let records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        // Lowest id first so "first match" is stable across runs
        let mut matches: Vec<&ProductRecord> = records.values().filter(|r| r.name == name).collect();
        matches.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(matches.first().map(|r| (*r).clone()))
    }

    async fn apply_update(&self, id: &str, update: &RecordUpdate) -> Result<(), StoreError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        if let Some(msg) = self.update_failure.lock().unwrap_or_else(|e| e.into_inner()).clone() {
            return Err(StoreError::Update(msg));
        }

        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        let record = records
            .get_mut(id)
            .ok_or_else(|| StoreError::Update(format!("Could not find page with ID: {}", id)))?;
        *record = record.patched(update);
        Ok(())
    }
}
