//! Inbound stage: client files → TracOS.

use anyhow::Context;
use serde_json::Value;
use std::path::Path;
use tracos_sync_file::{read_inbound_dir, InboundFile};
use tracos_sync_mongodb::{UpsertOutcome, WorkOrderStore};
use workorder_types::{forward, ExternalWorkOrder, WorkOrderStatus};

use crate::error::RecordError;
use crate::sync::BatchSummary;

/// A client work order that reached the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ingested {
    pub number: i64,
    pub status: WorkOrderStatus,
    pub outcome: UpsertOutcome,
}

/// Drives discover → validate → translate → upsert over one inbound batch.
///
/// `store` is `None` when the pipeline could not connect; every record that
/// would have been written is then counted as failed.
pub struct InboundSync<'a, S: WorkOrderStore + ?Sized> {
    store: Option<&'a S>,
}

impl<'a, S: WorkOrderStore + ?Sized> InboundSync<'a, S> {
    pub fn new(store: Option<&'a S>) -> Self {
        Self { store }
    }

    /// Ingest every `.json` file in `inbound_dir`.
    ///
    /// Errors only when the directory cannot be listed.
    pub async fn run(&self, inbound_dir: &Path) -> anyhow::Result<BatchSummary> {
        tracing::info!("Starting inbound sync from {}", inbound_dir.display());

        let files = read_inbound_dir(inbound_dir)
            .await
            .context("Failed to discover inbound work orders")?;
        if files.is_empty() {
            tracing::warn!("No inbound work orders found");
        }

        let summary = self.process_files(files).await;
        tracing::info!("Inbound sync completed: {summary}");
        Ok(summary)
    }

    /// Process already-discovered files one at a time.
    pub async fn process_files(&self, files: Vec<InboundFile>) -> BatchSummary {
        let mut summary = BatchSummary::default();

        for file in files {
            let name = file.name;
            let result = match file.contents {
                Ok(value) => self.ingest(value).await,
                Err(e) => Err(RecordError::Io(e)),
            };

            match &result {
                Ok(ingested) => tracing::info!(
                    "{}: work order #{} ({}) {}",
                    name,
                    ingested.number,
                    ingested.status,
                    ingested.outcome
                ),
                Err(e) => tracing::warn!("Skipping {name}: {e}"),
            }
            summary.record(&result);
        }

        summary
    }

    /// Validate, translate and upsert a single client document.
    pub async fn ingest(&self, value: Value) -> Result<Ingested, RecordError> {
        let external = ExternalWorkOrder::from_json(value)?;
        if external.status_flag_count() > 1 {
            tracing::debug!(
                "Work order #{} has several status flags set; applying precedence",
                external.order_no
            );
        }

        let internal = forward::to_internal(&external)?;
        let store = self.store.ok_or(RecordError::Disconnected)?;
        let outcome = store.upsert(&internal).await.map_err(RecordError::Store)?;

        Ok(Ingested {
            number: internal.number,
            status: internal.status,
            outcome,
        })
    }
}
