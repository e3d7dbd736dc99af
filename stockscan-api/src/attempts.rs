use std::collections::{HashMap, VecDeque};

use stockscan_shared::TransactionResult;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Where a scan-page attempt stands.
#[derive(Debug, Clone, PartialEq)]
pub enum Claim {
    /// Not seen before; the caller now owns the attempt and must
    /// `complete` or `release` it.
    Fresh,
    /// Another request is running this attempt.
    InFlight,
    /// Already decremented; show the recorded result instead of running again.
    Completed(TransactionResult),
}

#[derive(Debug)]
enum Entry {
    Pending,
    Done(TransactionResult),
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<Uuid, Entry>,
    order: VecDeque<Uuid>,
}

/// Remembers which scan-page attempts already decremented so a reload of the
/// same page does not decrement twice. Bounded; oldest attempts are forgotten
/// first. Held in process memory only.
#[derive(Debug)]
pub struct AttemptLedger {
    capacity: usize,
    inner: Mutex<Inner>,
}

impl AttemptLedger {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            inner: Mutex::new(Inner::default()),
        }
    }

    pub async fn claim(&self, attempt: Uuid) -> Claim {
        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;
        match inner.entries.get(&attempt) {
            Some(Entry::Pending) => return Claim::InFlight,
            Some(Entry::Done(result)) => return Claim::Completed(result.clone()),
            None => {}
        }

        // Running attempts are never evicted; the ledger may exceed capacity
        // while every entry is still pending.
        while inner.entries.len() >= self.capacity {
            let entries = &inner.entries;
            let Some(pos) = inner
                .order
                .iter()
                .position(|id| matches!(entries.get(id), Some(Entry::Done(_))))
            else {
                break;
            };
            if let Some(oldest) = inner.order.remove(pos) {
                inner.entries.remove(&oldest);
            }
        }
        inner.entries.insert(attempt, Entry::Pending);
        inner.order.push_back(attempt);
        Claim::Fresh
    }

    pub async fn complete(&self, attempt: Uuid, result: TransactionResult) {
        let mut inner = self.inner.lock().await;
        if let Some(entry) = inner.entries.get_mut(&attempt) {
            *entry = Entry::Done(result);
        }
    }

    /// Forget a failed attempt so that retrying it runs the scan again.
    pub async fn release(&self, attempt: Uuid) {
        let mut inner = self.inner.lock().await;
        if inner.entries.remove(&attempt).is_some() {
            inner.order.retain(|id| *id != attempt);
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.entries.len()
    }
}
