//! Store interface used by the sync stages.

use anyhow::Result;
use async_trait::async_trait;
use bson::Document;
use chrono::{DateTime, Utc};
use std::fmt;
use workorder_types::InternalWorkOrder;

/// What an upsert did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No record with this number existed.
    Inserted,
    /// An existing record was replaced with different content.
    Replaced,
    /// An identical record was already stored.
    Unchanged,
}

impl fmt::Display for UpsertOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpsertOutcome::Inserted => f.write_str("inserted"),
            UpsertOutcome::Replaced => f.write_str("replaced"),
            UpsertOutcome::Unchanged => f.write_str("unchanged"),
        }
    }
}

/// Work order persistence keyed by the unique work order number.
#[async_trait]
pub trait WorkOrderStore: Send + Sync {
    /// Create or wholly replace the record with `order.number`.
    async fn upsert(&self, order: &InternalWorkOrder) -> Result<UpsertOutcome>;

    /// Every stored record whose `isSynced` is `false`, as raw documents.
    ///
    /// Documents still carry their storage id; decoding is left to the caller
    /// so that one malformed record does not hide the others.
    async fn find_unsynced(&self) -> Result<Vec<Document>>;

    /// Set `isSynced = true` and `syncedAt` on the record with `number`.
    ///
    /// Fails if no such record exists.
    async fn mark_synced(&self, number: i64, synced_at: DateTime<Utc>) -> Result<()>;
}
