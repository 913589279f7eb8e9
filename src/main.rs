//! Command-line interface for tracos-sync
//!
//! Runs one inbound pass followed by one outbound pass. Every option can be
//! given as a flag or through its environment variable:
//!
//! ```bash
//! tracos-sync \
//!   --mongo-uri mongodb://localhost:27017 \
//!   --mongo-database tractian \
//!   --inbound-dir ./data/inbound \
//!   --outbound-dir ./data/outbound
//! ```

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracos_sync::{run_pipeline, SyncOpts};

#[derive(Parser)]
#[command(name = "tracos-sync")]
#[command(about = "Synchronize work orders between client JSON files and TracOS")]
#[command(long_about = None)]
struct Cli {
    #[command(flatten)]
    opts: SyncOpts,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Log at info unless RUST_LOG says otherwise
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Per-record and per-stage failures are reported in the logs and the
    // report; none of them make the run itself fail.
    let report = run_pipeline(&cli.opts).await;
    tracing::debug!("Final report: {report:?}");

    Ok(())
}
