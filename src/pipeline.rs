//! Two-stage pipeline: inbound, then outbound.

use std::fmt;
use std::path::Path;
use tracos_sync_file::DirectorySink;
use tracos_sync_mongodb::{ConnectionManager, MongoConnector, MongoOpts, WorkOrderStore};

use crate::config::SyncOpts;
use crate::inbound::InboundSync;
use crate::outbound::{OutboundSync, WorkOrderSink};
use crate::sync::BatchSummary;

/// Result of one pipeline run. A stage that failed as a whole has no summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineReport {
    pub inbound: Option<BatchSummary>,
    pub outbound: Option<BatchSummary>,
}

impl fmt::Display for PipelineReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn stage(summary: &Option<BatchSummary>) -> String {
            summary.map_or_else(|| "stage failed".to_string(), |s| s.to_string())
        }
        write!(
            f,
            "inbound: {}; outbound: {}",
            stage(&self.inbound),
            stage(&self.outbound)
        )
    }
}

/// Run the inbound stage to completion, then the outbound stage.
///
/// The outbound stage runs whatever happened inbound.
pub async fn run_stages<S, K>(store: Option<&S>, inbound_dir: &Path, sink: &K) -> PipelineReport
where
    S: WorkOrderStore + ?Sized,
    K: WorkOrderSink + ?Sized,
{
    tracing::info!("Stage 1: inbound (client -> TracOS)");
    let inbound = match InboundSync::new(store).run(inbound_dir).await {
        Ok(summary) => Some(summary),
        Err(e) => {
            tracing::error!("Inbound stage failed: {e:#}");
            None
        }
    };

    tracing::info!("Stage 2: outbound (TracOS -> client)");
    let outbound = match OutboundSync::new(store, sink).run().await {
        Ok(summary) => Some(summary),
        Err(e) => {
            tracing::error!("Outbound stage failed: {e:#}");
            None
        }
    };

    PipelineReport { inbound, outbound }
}

/// Connect to MongoDB once, run both stages against that handle, then close.
pub async fn run_pipeline(opts: &SyncOpts) -> PipelineReport {
    let connector = MongoConnector::new(MongoOpts::from(&opts.store));
    let mut connection = ConnectionManager::new(connector, opts.store.retry_policy());
    connection.connect().await;

    let sink = DirectorySink::new(&opts.files.outbound_dir);
    let report = run_stages(connection.handle(), &opts.files.inbound_dir, &sink).await;

    connection.close().await;
    tracing::info!("Pipeline complete: {report}");
    report
}
