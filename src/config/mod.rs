//! Command-line and environment configuration.

mod duration;

use clap::Args;
use std::path::PathBuf;
use std::time::Duration;
use tracos_sync_mongodb::{MongoOpts, RetryPolicy};

pub use duration::parse_duration;

/// TracOS store connection options
#[derive(Args, Clone, Debug)]
pub struct StoreOpts {
    /// MongoDB connection string
    #[arg(long, default_value = "mongodb://localhost:27017", env = "MONGO_URI")]
    pub mongo_uri: String,

    /// MongoDB database holding the work order collection
    #[arg(long, default_value = "tractian", env = "MONGO_DATABASE")]
    pub mongo_database: String,

    /// Work order collection name
    #[arg(long, default_value = "workorders", env = "MONGO_COLLECTION")]
    pub mongo_collection: String,

    /// Connection attempts before running disconnected (at least 1)
    #[arg(
        long,
        default_value = "3",
        env = "MONGO_CONNECT_ATTEMPTS",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub connect_attempts: u32,

    /// Delay between connection attempts (e.g. "2s", "500ms", "1m")
    #[arg(
        long,
        default_value = "2s",
        env = "MONGO_CONNECT_RETRY_DELAY",
        value_parser = parse_duration
    )]
    pub connect_retry_delay: Duration,

    /// Server selection and connect timeout for each attempt
    #[arg(
        long,
        default_value = "5s",
        env = "MONGO_SERVER_SELECTION_TIMEOUT",
        value_parser = parse_duration
    )]
    pub server_selection_timeout: Duration,
}

impl StoreOpts {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.connect_attempts, self.connect_retry_delay)
    }
}

// CLI type → store crate type conversion
impl From<&StoreOpts> for MongoOpts {
    fn from(opts: &StoreOpts) -> Self {
        Self {
            uri: opts.mongo_uri.clone(),
            database: opts.mongo_database.clone(),
            collection: opts.mongo_collection.clone(),
            server_selection_timeout: opts.server_selection_timeout,
        }
    }
}

/// Client file exchange options
#[derive(Args, Clone, Debug)]
pub struct FileOpts {
    /// Directory the client drops work order JSON files into
    #[arg(long, default_value = "./data/inbound", env = "DATA_INBOUND_DIR")]
    pub inbound_dir: PathBuf,

    /// Directory synced work orders are written to for the client
    #[arg(long, default_value = "./data/outbound", env = "DATA_OUTBOUND_DIR")]
    pub outbound_dir: PathBuf,
}

/// Everything a pipeline run needs.
#[derive(Args, Clone, Debug)]
pub struct SyncOpts {
    #[command(flatten)]
    pub store: StoreOpts,

    #[command(flatten)]
    pub files: FileOpts,
}
