//! Per-record failure taxonomy.

use thiserror::Error;
use workorder_types::{TranslationError, ValidationError};

/// Why a single work order was not synchronized.
///
/// Every variant is local to one record: the batch carries on and the
/// failure is only counted.
#[derive(Error, Debug)]
pub enum RecordError {
    /// The store could not be reached when the pipeline started.
    #[error("store is not connected")]
    Disconnected,

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("translation failed: {0}")]
    Translation(#[from] TranslationError),

    /// Unreadable or corrupt source file, or unwritable sink.
    #[error("I/O failure: {0:#}")]
    Io(anyhow::Error),

    /// The store rejected an operation on an otherwise valid record.
    #[error("store operation failed: {0:#}")]
    Store(anyhow::Error),
}
