//! Outbound directory writer

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Writes pretty-printed JSON documents into a directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `value` to `<dir>/<file_name>`, replacing any existing file.
    ///
    /// The directory is created if missing. Returns the written path only
    /// after the write has completed.
    pub async fn write_json<T: Serialize + ?Sized>(&self, file_name: &str, value: &T) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create directory: {}", self.dir.display()))?;

        let path = self.dir.join(file_name);
        let body = serde_json::to_vec_pretty(value)
            .with_context(|| format!("Failed to serialize {file_name}"))?;
        tokio::fs::write(&path, body)
            .await
            .with_context(|| format!("Failed to write file: {}", path.display()))?;

        tracing::debug!("Wrote {}", path.display());
        Ok(path)
    }
}
