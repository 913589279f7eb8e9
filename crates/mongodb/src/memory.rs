//! In-process work order store.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use bson::{oid::ObjectId, Bson, Document};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};
use workorder_types::InternalWorkOrder;

use crate::store::{UpsertOutcome, WorkOrderStore};

/// A [`WorkOrderStore`] kept in memory, with MongoDB's observable behavior:
/// documents get an `_id` on insert that survives replacement, and only a
/// boolean `false` matches the unsynced query.
///
/// Individual numbers can be made to fail, to exercise per-record error
/// handling.
#[derive(Default)]
pub struct MemoryStore {
    documents: Mutex<BTreeMap<i64, Document>>,
    failing_upserts: Mutex<HashSet<i64>>,
    failing_marks: Mutex<HashSet<i64>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw document as another TracOS writer would.
    pub fn insert_raw(&self, mut document: Document) -> Result<()> {
        let number = number_of(&document).ok_or_else(|| anyhow!("document has no integer 'number'"))?;
        if !document.contains_key("_id") {
            document.insert("_id", ObjectId::new());
        }
        lock(&self.documents).insert(number, document);
        Ok(())
    }

    pub fn get(&self, number: i64) -> Option<Document> {
        lock(&self.documents).get(&number).cloned()
    }

    pub fn len(&self) -> usize {
        lock(&self.documents).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Make every upsert of `number` fail.
    pub fn fail_upserts_for(&self, number: i64) {
        lock(&self.failing_upserts).insert(number);
    }

    /// Make every mark-synced of `number` fail.
    pub fn fail_mark_synced_for(&self, number: i64) {
        lock(&self.failing_marks).insert(number);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn number_of(document: &Document) -> Option<i64> {
    match document.get("number")? {
        Bson::Int32(n) => Some(i64::from(*n)),
        Bson::Int64(n) => Some(*n),
        _ => None,
    }
}

#[async_trait]
impl WorkOrderStore for MemoryStore {
    async fn upsert(&self, order: &InternalWorkOrder) -> Result<UpsertOutcome> {
        if lock(&self.failing_upserts).contains(&order.number) {
            anyhow::bail!("injected upsert failure for work order #{}", order.number);
        }

        let mut replacement = order.to_document()?;
        let mut documents = lock(&self.documents);

        match documents.get_mut(&order.number) {
            Some(existing) => {
                if let Some(id) = existing.get("_id").cloned() {
                    replacement.insert("_id", id);
                }
                if *existing == replacement {
                    return Ok(UpsertOutcome::Unchanged);
                }
                *existing = replacement;
                Ok(UpsertOutcome::Replaced)
            }
            None => {
                replacement.insert("_id", ObjectId::new());
                documents.insert(order.number, replacement);
                Ok(UpsertOutcome::Inserted)
            }
        }
    }

    async fn find_unsynced(&self) -> Result<Vec<Document>> {
        Ok(lock(&self.documents)
            .values()
            .filter(|doc| matches!(doc.get("isSynced"), Some(Bson::Boolean(false))))
            .cloned()
            .collect())
    }

    async fn mark_synced(&self, number: i64, synced_at: DateTime<Utc>) -> Result<()> {
        if lock(&self.failing_marks).contains(&number) {
            anyhow::bail!("injected mark-synced failure for work order #{number}");
        }

        let mut documents = lock(&self.documents);
        let document = documents
            .get_mut(&number)
            .ok_or_else(|| anyhow!("Work order #{number} no longer exists in the store"))?;
        document.insert("isSynced", true);
        document.insert("syncedAt", bson::DateTime::from_chrono(synced_at));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use chrono::TimeZone;
    use workorder_types::{InternalWorkOrder, WorkOrderStatus};

    fn order(number: i64, title: &str) -> InternalWorkOrder {
        InternalWorkOrder {
            number,
            status: WorkOrderStatus::Pending,
            title: title.to_string(),
            description: title.to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap().into(),
            updated_at: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap().into(),
            deleted: false,
            deleted_at: None,
            is_synced: false,
            synced_at: None,
        }
    }

    #[tokio::test]
    async fn test_upsert_is_idempotent() {
        let store = MemoryStore::new();
        let wo = order(1, "Pump check");

        assert_eq!(store.upsert(&wo).await.unwrap(), UpsertOutcome::Inserted);
        let first = store.get(1).unwrap();
        assert_eq!(store.upsert(&wo).await.unwrap(), UpsertOutcome::Unchanged);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(1).unwrap(), first);
    }

    #[tokio::test]
    async fn test_replace_keeps_storage_id() {
        let store = MemoryStore::new();
        store.upsert(&order(1, "Pump check")).await.unwrap();
        let id = store.get(1).unwrap().get_object_id("_id").unwrap();

        let outcome = store.upsert(&order(1, "Pump overhaul")).await.unwrap();
        assert_eq!(outcome, UpsertOutcome::Replaced);

        let stored = store.get(1).unwrap();
        assert_eq!(stored.get_object_id("_id").unwrap(), id);
        assert_eq!(stored.get_str("title").unwrap(), "Pump overhaul");
    }

    #[tokio::test]
    async fn test_find_unsynced_matches_only_false() {
        let store = MemoryStore::new();
        store.upsert(&order(1, "a")).await.unwrap();
        store.upsert(&order(2, "b")).await.unwrap();
        store
            .insert_raw(doc! { "number": 3_i32, "title": "no flag" })
            .unwrap();
        store
            .mark_synced(2, Utc::now())
            .await
            .unwrap();

        let unsynced = store.find_unsynced().await.unwrap();
        assert_eq!(unsynced.len(), 1);
        assert_eq!(unsynced[0].get_i64("number").unwrap(), 1);
    }

    #[tokio::test]
    async fn test_mark_synced_sets_both_fields() {
        let store = MemoryStore::new();
        store.upsert(&order(5, "x")).await.unwrap();
        let at = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();

        store.mark_synced(5, at).await.unwrap();

        let stored = store.get(5).unwrap();
        assert!(stored.get_bool("isSynced").unwrap());
        assert_eq!(stored.get_datetime("syncedAt").unwrap().to_chrono(), at);
    }

    #[tokio::test]
    async fn test_mark_synced_unknown_number_fails() {
        let store = MemoryStore::new();
        assert!(store.mark_synced(99, Utc::now()).await.is_err());
    }

    #[tokio::test]
    async fn test_injected_failures() {
        let store = MemoryStore::new();
        store.fail_upserts_for(1);
        assert!(store.upsert(&order(1, "a")).await.is_err());
        assert!(store.is_empty());

        store.upsert(&order(2, "b")).await.unwrap();
        store.fail_mark_synced_for(2);
        assert!(store.mark_synced(2, Utc::now()).await.is_err());
        assert!(!store.get(2).unwrap().get_bool("isSynced").unwrap());
    }
}
