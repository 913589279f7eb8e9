//! Client work order file exchange on the local filesystem.
//!
//! The client drops one JSON document per work order into an inbound
//! directory and picks up one JSON document per work order from an outbound
//! directory.
//!
//! # Example
//!
//! ```ignore
//! use tracos_sync_file::{read_inbound_dir, DirectorySink};
//!
//! for file in read_inbound_dir(Path::new("./data/inbound")).await? {
//!     match file.contents {
//!         Ok(value) => { /* validate, translate, store */ }
//!         Err(e) => tracing::warn!("Skipping {}: {e:#}", file.name),
//!     }
//! }
//!
//! let sink = DirectorySink::new("./data/outbound");
//! sink.write_json("1.json", &payload).await?;
//! ```

mod local;
mod sink;

use std::path::{Path, PathBuf};

pub use local::{list_directory, read_json};
pub use sink::DirectorySink;

/// Extension of client work order files
pub const JSON_EXTENSION: &str = "json";

/// One candidate file from the inbound directory.
///
/// A file that cannot be read or parsed still appears here, with the failure
/// in `contents`, so callers can count it.
#[derive(Debug)]
pub struct InboundFile {
    pub path: PathBuf,
    pub name: String,
    pub contents: anyhow::Result<serde_json::Value>,
}

/// Read every `.json` file directly inside `dir`, in file name order.
///
/// Fails only when the directory itself cannot be listed.
pub async fn read_inbound_dir(dir: &Path) -> anyhow::Result<Vec<InboundFile>> {
    let paths = list_directory(dir, JSON_EXTENSION).await?;
    tracing::info!("Found {} JSON files in {}", paths.len(), dir.display());

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let contents = read_json(&path).await;
        files.push(InboundFile {
            path,
            name,
            contents,
        });
    }
    Ok(files)
}
