use anyhow::Result;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::{Credentials, WorkflowMetricsConfig};
use crate::github::{GitHubClient, GitHubError};
use crate::metrics::{
    append_github_output, format_actions_output, format_summary, github_actions_enabled,
    MetricsCollector, MetricsReport, ReportStorage,
};

pub const MISSING_TOKEN_MESSAGE: &str = "❌ GITHUB_TOKEN environment variable not set";

/// What a run ended with
#[derive(Debug)]
pub enum CollectOutcome {
    /// No token configured; nothing was fetched or written
    MissingToken,
    /// Report collected and written to `path`
    Saved { report: MetricsReport, path: PathBuf },
}

pub struct CollectMetricsCommand {
    config: WorkflowMetricsConfig,
}

impl CollectMetricsCommand {
    pub fn new(config: WorkflowMetricsConfig) -> Self {
        Self { config }
    }

    pub async fn execute(&self) -> Result<()> {
        self.run(|key| std::env::var(key).ok()).await?;
        Ok(())
    }

    /// Collect, summarize, store and (inside GitHub Actions) publish the report.
    /// `lookup` resolves the runner variables GITHUB_ACTIONS and GITHUB_OUTPUT.
    pub async fn run<F>(&self, lookup: F) -> Result<CollectOutcome>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials = match Credentials::from_config(&self.config.github) {
            Ok(credentials) => credentials,
            Err(GitHubError::TokenNotFound(reason)) => {
                warn!(reason = %reason, "Skipping metrics collection");
                println!("{MISSING_TOKEN_MESSAGE}");
                return Ok(CollectOutcome::MissingToken);
            }
            Err(e) => return Err(e.into()),
        };

        let client = GitHubClient::new(&credentials, &self.config.github.api_base_url)?;
        let collector = MetricsCollector::new(client, credentials.repository())
            .with_lookback_days(self.config.collection.lookback_days);

        let report = collector.collect_metrics().await?;

        println!();
        println!("{}", format_summary(&report));

        let storage = ReportStorage::new(&self.config.collection.output_path);
        storage.write_report(&report).await?;
        println!();
        println!("✅ Metrics saved to {}", storage.output_path().display());

        if github_actions_enabled(&lookup) {
            println!("{}", format_actions_output(&report)?);

            if let Some(output_file) = lookup("GITHUB_OUTPUT").filter(|path| !path.is_empty()) {
                append_github_output(std::path::Path::new(&output_file), &report).await?;
                info!(path = %output_file, "Published metrics to GITHUB_OUTPUT");
            }
        }

        Ok(CollectOutcome::Saved {
            report,
            path: storage.output_path().to_path_buf(),
        })
    }
}
