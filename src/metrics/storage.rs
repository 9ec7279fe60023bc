use super::types::MetricsReport;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Writes the report file. Each run replaces the previous file; nothing is merged.
#[derive(Debug)]
pub struct ReportStorage {
    output_path: PathBuf,
}

impl ReportStorage {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Serialize with 2-space indentation and overwrite the output file
    pub async fn write_report(&self, report: &MetricsReport) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(report)?;

        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        fs::write(&self.output_path, content).await?;

        tracing::info!(path = %self.output_path.display(), "Metrics report written");
        Ok(())
    }
}

/// Append `metrics=<json>` to the runner's `$GITHUB_OUTPUT` file
pub async fn append_github_output(path: &Path, report: &MetricsReport) -> Result<(), StorageError> {
    let line = format!("metrics={}\n", serde_json::to_string(report)?);

    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    file.write_all(line.as_bytes()).await?;
    file.flush().await?;

    Ok(())
}
