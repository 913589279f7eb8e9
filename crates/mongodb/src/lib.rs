//! TracOS store access for tracos-sync.
//!
//! - [`ConnectionManager`] owns the single store handle for a pipeline run and
//!   retries transient connect failures with a [`RetryPolicy`].
//! - [`WorkOrderStore`] is the narrow interface the sync stages use: upsert
//!   by number, query unsynced records, mark a record synced.
//! - [`MongoStore`] implements it on a MongoDB collection; [`MemoryStore`]
//!   implements it in process for tests and dry runs.

mod connect;
mod memory;
mod mongo;
mod retry;
mod store;

pub use connect::{ConnectionManager, Connector};
pub use memory::MemoryStore;
pub use mongo::{MongoConnector, MongoOpts, MongoStore};
pub use retry::{retry, RetryPolicy, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY};
pub use store::{UpsertOutcome, WorkOrderStore};
