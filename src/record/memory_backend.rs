//! In-memory record store using DashMap.
//!
//! Records are lost on service restart. Intended for tests and local runs.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use super::backend::{DeliveryRecord, NewDeliveryRecord, RecordId, RecordStore, StoreError};

pub struct MemoryRecordStore {
    records: DashMap<RecordId, DeliveryRecord>,
    next_id: AtomicI64,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records ordered by id
    pub fn records(&self) -> Vec<DeliveryRecord> {
        let mut records: Vec<DeliveryRecord> =
            self.records.iter().map(|r| r.value().clone()).collect();
        records.sort_by_key(|r| r.id);
        records
    }
}

impl Default for MemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    fn backend_type(&self) -> &'static str {
        "memory"
    }

    async fn persist(&self, record: NewDeliveryRecord) -> Result<DeliveryRecord, StoreError> {
        let id = RecordId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let stored = DeliveryRecord {
            id,
            to_email: record.to_email,
            subject: record.subject,
            content: record.content,
            sent_at: Utc::now(),
        };

        self.records.insert(id, stored.clone());

        tracing::trace!(record_id = %id, "Delivery record stored in memory");

        Ok(stored)
    }

    async fn get(&self, id: RecordId) -> Result<Option<DeliveryRecord>, StoreError> {
        Ok(self.records.get(&id).map(|r| r.value().clone()))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_ok;

    fn new_record(to: &str) -> NewDeliveryRecord {
        NewDeliveryRecord {
            to_email: to.to_string(),
            subject: "Subject".to_string(),
            content: "Body".to_string(),
        }
    }

    #[tokio::test]
    async fn test_persist_assigns_increasing_ids() {
        let store = MemoryRecordStore::new();

        let first = store.persist(new_record("a@b.com")).await.unwrap();
        let second = store.persist(new_record("c@d.com")).await.unwrap();

        assert_eq!(first.id, RecordId::new(1));
        assert!(second.id > first.id);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_round_trip() {
        let store = MemoryRecordStore::new();
        let started = Utc::now();

        let stored = store.persist(new_record("a@b.com")).await.unwrap();
        let fetched = store.get(stored.id).await.unwrap().unwrap();

        assert_eq!(fetched.to_email, "a@b.com");
        assert_eq!(fetched.subject, "Subject");
        assert_eq!(fetched.content, "Body");
        assert!(fetched.sent_at >= started);
    }

    #[tokio::test]
    async fn test_get_unknown_id() {
        let store = MemoryRecordStore::new();
        assert!(store.get(RecordId::new(99)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_health_check() {
        let store = MemoryRecordStore::new();
        assert_ok!(store.health_check().await);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_persist_ids_are_unique() {
        let store = std::sync::Arc::new(MemoryRecordStore::new());

        let handles: Vec<_> = (0..20)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .persist(new_record(&format!("user{i}@b.com")))
                        .await
                        .unwrap()
                        .id
                })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 20);
        assert_eq!(store.records().len(), 20);
    }
}
