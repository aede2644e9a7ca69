//! In-memory storage backend.
//!
//! Used by tests and by the service when no database is configured. State
//! lives for the lifetime of the store value.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use subtrack_core::{FilterSet, NewSubscription, Subscription, SubscriptionId};

use crate::error::{Result, StoreError};
use crate::Store;

/// Map-backed store with monotonically increasing ids.
#[derive(Debug)]
pub struct MemoryStore {
    records: RwLock<BTreeMap<SubscriptionId, Subscription>>,
    next_id: AtomicI64,
}

impl MemoryStore {
    /// Create an empty store. The first id handed out is 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert(&self, new: &NewSubscription) -> Result<Subscription> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let subscription = Subscription::from_new(id, new.clone());

        self.records.write().await.insert(id, subscription.clone());
        Ok(subscription)
    }

    async fn find_by_id(&self, id: SubscriptionId) -> Result<Option<Subscription>> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn find_all(&self, limit: usize, offset: usize) -> Result<Vec<Subscription>> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn replace(&self, id: SubscriptionId, new: &NewSubscription) -> Result<Subscription> {
        let mut records = self.records.write().await;
        let slot = records
            .get_mut(&id)
            .ok_or_else(|| StoreError::subscription_not_found(id))?;

        *slot = Subscription::from_new(id, new.clone());
        Ok(slot.clone())
    }

    async fn delete_by_id(&self, id: SubscriptionId) -> Result<()> {
        self.records
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::subscription_not_found(id))
    }

    async fn aggregate_sum(&self, filters: &FilterSet) -> Result<Option<i64>> {
        let records = self.records.read().await;
        let mut matching = records.values().filter(|s| filters.matches(s)).peekable();

        if matching.peek().is_none() {
            return Ok(None);
        }

        matching
            .try_fold(0_i64, |acc, s| acc.checked_add(s.price))
            .map(Some)
            .ok_or_else(|| StoreError::Database("bigint out of range".into()))
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
