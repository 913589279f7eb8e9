//! tracos-sync library
//!
//! Keeps work orders consistent between a client system, which exchanges
//! JSON files, and TracOS, which keeps canonical records in MongoDB.
//!
//! A run is one discrete batch pass in two stages:
//!
//! 1. **Inbound** ([`inbound`]): every client file is validated, translated
//!    and upserted by work order number. New and replaced records are stored
//!    unsynced.
//! 2. **Outbound** ([`outbound`]): every unsynced TracOS record is translated
//!    back, written as `<orderNo>.json`, and only then marked synced.
//!
//! Failures are counted per record and never abort a batch; a stage that
//! fails as a whole does not prevent the other from running.
//!
//! # CLI Usage
//!
//! ```bash
//! MONGO_URI=mongodb://localhost:27017 \
//! DATA_INBOUND_DIR=./data/inbound \
//! DATA_OUTBOUND_DIR=./data/outbound \
//! tracos-sync
//! ```

pub mod config;
mod error;
pub mod inbound;
pub mod outbound;
pub mod pipeline;
mod sync;

pub use config::{FileOpts, StoreOpts, SyncOpts};
pub use error::RecordError;
pub use inbound::InboundSync;
pub use outbound::{OutboundSync, WorkOrderSink};
pub use pipeline::{run_pipeline, run_stages, PipelineReport};
pub use sync::BatchSummary;

// Re-export the supporting crates for convenience
pub use tracos_sync_file as file;
pub use tracos_sync_mongodb as store;
pub use workorder_types as types;
