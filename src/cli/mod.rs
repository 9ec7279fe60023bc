use clap::Parser;
use std::path::PathBuf;

use crate::config::WorkflowMetricsConfig;

pub mod commands;

#[derive(Parser, Debug)]
#[command(name = "workflow-metrics")]
#[command(about = "Collect weekly consistency-check workflow metrics from GitHub")]
#[command(long_about = "Queries the GitHub REST API for issues, pull requests, workflow runs and labels \
                       touched in the last week, counts consistency-check tracking labels, red-flag \
                       phrases and check outcomes, and writes the report to workflow-metrics.json. \
                       Requires GITHUB_TOKEN.")]
pub struct Cli {
    /// Configuration file (defaults to workflow-metrics.toml when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Repository to inspect, overriding GITHUB_REPOSITORY
    #[arg(long, value_name = "OWNER/NAME")]
    pub repo: Option<String>,
    /// Report file to overwrite
    #[arg(long, value_name = "FILE", help = "Report file to overwrite (default: workflow-metrics.json)")]
    pub output: Option<String>,
    /// Size of the activity window in days
    #[arg(long, value_name = "DAYS", help = "Days of activity to include (default: 7)")]
    pub lookback_days: Option<i64>,
    /// GitHub REST API base URL
    #[arg(long, value_name = "URL", help = "REST API base URL (default: https://api.github.com)")]
    pub api_url: Option<String>,
    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    pub json_logs: bool,
}

impl Cli {
    /// Command-line flags take precedence over every other configuration source
    pub fn apply_overrides(&self, config: &mut WorkflowMetricsConfig) {
        if let Some(repo) = &self.repo {
            config.github.repository = Some(repo.clone());
        }
        if let Some(output) = &self.output {
            config.collection.output_path = output.clone();
        }
        if let Some(days) = self.lookback_days {
            config.collection.lookback_days = days;
        }
        if let Some(api_url) = &self.api_url {
            config.github.api_base_url = api_url.clone();
        }
        if self.json_logs {
            config.observability.json_logs = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Credentials, DEFAULT_REPOSITORY};

    #[test]
    fn flags_override_configuration() {
        let cli = Cli::parse_from([
            "workflow-metrics",
            "--repo",
            "acme/widgets",
            "--output",
            "out/metrics.json",
            "--lookback-days",
            "30",
            "--json-logs",
        ]);
        let mut config = WorkflowMetricsConfig::default();
        config.github.repository = Some("env/repo".to_string());

        cli.apply_overrides(&mut config);

        assert_eq!(config.github.repository.as_deref(), Some("acme/widgets"));
        assert_eq!(config.collection.output_path, "out/metrics.json");
        assert_eq!(config.collection.lookback_days, 30);
        assert!(config.observability.json_logs);
        assert_eq!(config.github.api_base_url, "https://api.github.com");
    }

    #[test]
    fn no_flags_leave_configuration_alone() {
        let cli = Cli::parse_from(["workflow-metrics"]);
        let mut config = WorkflowMetricsConfig::default();

        cli.apply_overrides(&mut config);

        assert!(config.github.repository.is_none());
        assert_eq!(config.collection.output_path, "workflow-metrics.json");
        assert!(!config.observability.json_logs);
    }

    #[test]
    fn empty_repo_flag_uses_placeholder_repository() {
        let cli = Cli::parse_from(["workflow-metrics", "--repo", ""]);
        let mut config = WorkflowMetricsConfig::default();
        config.github.token = Some("ghp_abc".to_string());

        cli.apply_overrides(&mut config);
        let credentials = Credentials::from_config(&config.github).unwrap();

        assert_eq!(credentials.repository(), DEFAULT_REPOSITORY);
    }
}
