//! Outbound stage: TracOS → client files.

use anyhow::anyhow;
use async_trait::async_trait;
use bson::{Bson, Document};
use chrono::Utc;
use std::path::PathBuf;
use tracos_sync_file::DirectorySink;
use tracos_sync_mongodb::WorkOrderStore;
use workorder_types::{reverse, ExternalWorkOrder, InternalWorkOrder};

use crate::error::RecordError;
use crate::sync::BatchSummary;

/// Destination for translated work orders.
#[async_trait]
pub trait WorkOrderSink: Send + Sync {
    /// Durably write one work order, returning where it went.
    async fn write(&self, order: &ExternalWorkOrder) -> anyhow::Result<PathBuf>;
}

/// Name of the outbound file for a client order number.
pub fn outbound_file_name(order_no: i64) -> String {
    format!("{order_no}.json")
}

#[async_trait]
impl WorkOrderSink for DirectorySink {
    async fn write(&self, order: &ExternalWorkOrder) -> anyhow::Result<PathBuf> {
        self.write_json(&outbound_file_name(order.order_no), order)
            .await
    }
}

/// A work order written to the sink and marked synced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    pub number: i64,
    pub path: PathBuf,
}

/// Drives query(unsynced) → translate → write → mark-synced over one batch.
pub struct OutboundSync<'a, S: WorkOrderStore + ?Sized, K: WorkOrderSink + ?Sized> {
    store: Option<&'a S>,
    sink: &'a K,
}

impl<'a, S, K> OutboundSync<'a, S, K>
where
    S: WorkOrderStore + ?Sized,
    K: WorkOrderSink + ?Sized,
{
    pub fn new(store: Option<&'a S>, sink: &'a K) -> Self {
        Self { store, sink }
    }

    /// Publish every unsynced work order.
    ///
    /// Errors when there is no store to query, or the query itself fails.
    pub async fn run(&self) -> anyhow::Result<BatchSummary> {
        tracing::info!("Starting outbound sync");

        let store = self
            .store
            .ok_or_else(|| anyhow!(RecordError::Disconnected))?;
        let pending = store.find_unsynced().await?;
        if pending.is_empty() {
            tracing::info!("No work orders to synchronize");
        } else {
            tracing::info!("Processing {} unsynced work orders", pending.len());
        }

        let mut summary = BatchSummary::default();
        for document in pending {
            let label = describe(&document);
            let result = self.publish(store, document).await;
            match &result {
                Ok(published) => tracing::info!(
                    "Work order #{} written to {} and marked synced",
                    published.number,
                    published.path.display()
                ),
                Err(e) => tracing::warn!("Work order {label} not synced: {e}"),
            }
            summary.record(&result);
        }

        tracing::info!("Outbound sync completed: {summary}");
        Ok(summary)
    }

    /// Publish one stored document.
    ///
    /// The record is marked synced only after the sink reports a completed
    /// write; on any earlier failure it stays unsynced for the next run.
    pub async fn publish(&self, store: &S, document: Document) -> Result<Published, RecordError> {
        let internal = InternalWorkOrder::from_stored(document)?;
        let external = reverse::to_external(&internal);

        let path = self.sink.write(&external).await.map_err(RecordError::Io)?;

        store
            .mark_synced(internal.number, Utc::now())
            .await
            .map_err(RecordError::Store)?;

        Ok(Published {
            number: internal.number,
            path,
        })
    }
}

/// Log label for a stored document that may not decode.
fn describe(document: &Document) -> String {
    match (document.get("number"), document.get("_id")) {
        (Some(Bson::Int32(n)), _) => format!("#{n}"),
        (Some(Bson::Int64(n)), _) => format!("#{n}"),
        (_, Some(id)) => format!("with _id {id}"),
        _ => "<unidentified>".to_string(),
    }
}
