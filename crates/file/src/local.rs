//! Local filesystem reading

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// List files with the given extension in a directory (non-recursive).
///
/// Subdirectories are skipped. Results are sorted by path for a stable
/// processing order.
pub async fn list_directory(path: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut results = Vec::new();

    let mut entries = tokio::fs::read_dir(path)
        .await
        .with_context(|| format!("Failed to read directory: {}", path.display()))?;

    while let Some(entry) = entries.next_entry().await? {
        let entry_path = entry.path();
        let metadata = entry
            .metadata()
            .await
            .with_context(|| format!("Failed to get metadata for: {}", entry_path.display()))?;

        if metadata.is_file() && entry_path.extension().and_then(|e| e.to_str()) == Some(extension)
        {
            results.push(entry_path);
        }
    }

    results.sort();

    tracing::debug!(
        "Listed {} .{} files in directory: {}",
        results.len(),
        extension,
        path.display()
    );

    Ok(results)
}

/// Read and parse one JSON document.
pub async fn read_json(path: &Path) -> Result<serde_json::Value> {
    let contents = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    serde_json::from_slice(&contents)
        .with_context(|| format!("Invalid JSON in file: {}", path.display()))
}
