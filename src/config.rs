use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::github::GitHubError;

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_REPOSITORY: &str = "your-username/thorium90";
pub const DEFAULT_OUTPUT_PATH: &str = "workflow-metrics.json";
pub const DEFAULT_LOOKBACK_DAYS: i64 = 7;
const DEFAULT_CONFIG_FILE: &str = "workflow-metrics.toml";

/// Main configuration structure for the metrics collector
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkflowMetricsConfig {
    /// GitHub configuration
    pub github: GitHubConfig,
    /// What to collect and where to write it
    pub collection: CollectionConfig,
    /// Observability settings
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitHubConfig {
    /// GitHub API token (usually taken from GITHUB_TOKEN)
    #[serde(default)]
    pub token: Option<String>,
    /// Repository identifier in `owner/name` form
    #[serde(default)]
    pub repository: Option<String>,
    /// REST API base URL
    pub api_base_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CollectionConfig {
    /// Size of the activity window in days
    pub lookback_days: i64,
    /// Report file, overwritten on every run
    pub output_path: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level used when RUST_LOG is not set
    pub log_level: String,
    /// Emit logs as JSON lines instead of human-readable text
    pub json_logs: bool,
}

impl Default for WorkflowMetricsConfig {
    fn default() -> Self {
        Self {
            github: GitHubConfig {
                token: None, // Will be read from GITHUB_TOKEN
                repository: None,
                api_base_url: DEFAULT_API_BASE_URL.to_string(),
            },
            collection: CollectionConfig {
                lookback_days: DEFAULT_LOOKBACK_DAYS,
                output_path: DEFAULT_OUTPUT_PATH.to_string(),
            },
            observability: ObservabilityConfig {
                log_level: "info".to_string(),
                json_logs: false,
            },
        }
    }
}

impl WorkflowMetricsConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration file (`--config`, or workflow-metrics.toml when present)
    /// 3. Environment variables (prefixed with WORKFLOW_METRICS__)
    /// 4. GITHUB_TOKEN / GITHUB_REPOSITORY for values still unset
    ///
    /// The result is not validated; call `validate` once command-line
    /// overrides have been applied.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("github.api_base_url", defaults.github.api_base_url)?
            .set_default("collection.lookback_days", defaults.collection.lookback_days)?
            .set_default("collection.output_path", defaults.collection.output_path)?
            .set_default("observability.log_level", defaults.observability.log_level)?
            .set_default("observability.json_logs", defaults.observability.json_logs)?;

        match config_path {
            Some(path) => {
                builder = builder.add_source(File::from(path).required(true));
            }
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                builder = builder.add_source(File::with_name(DEFAULT_CONFIG_FILE));
            }
            None => {}
        }

        builder = builder.add_source(
            Environment::with_prefix("WORKFLOW_METRICS")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let mut config: WorkflowMetricsConfig = builder.build()?.try_deserialize()?;
        config.apply_github_environment(|key| std::env::var(key).ok());

        Ok(config)
    }

    /// Fill token and repository from the variables GitHub Actions provides
    pub fn apply_github_environment<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &str| lookup(key).filter(|value| !value.is_empty());

        self.github.token = non_empty(self.github.token.take());
        self.github.repository = non_empty(self.github.repository.take());
        if self.github.token.is_none() {
            self.github.token = present("GITHUB_TOKEN");
        }
        if self.github.repository.is_none() {
            self.github.repository = present("GITHUB_REPOSITORY");
        }
    }

    pub fn validate(&self) -> Result<(), GitHubError> {
        if self.collection.lookback_days < 1 {
            return Err(GitHubError::Configuration(format!(
                "collection.lookback_days must be at least 1, got {}",
                self.collection.lookback_days
            )));
        }
        if self.collection.output_path.trim().is_empty() {
            return Err(GitHubError::Configuration(
                "collection.output_path must not be empty".to_string(),
            ));
        }
        if self.github.api_base_url.trim().is_empty() {
            return Err(GitHubError::Configuration(
                "github.api_base_url must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
        }
        Ok(())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

/// Token and repository for one run. Never mutated after construction.
#[derive(Clone)]
pub struct Credentials {
    token: String,
    repository: String,
}

impl Credentials {
    pub fn new(token: Option<String>, repository: impl Into<String>) -> Result<Self, GitHubError> {
        let token = token
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                GitHubError::TokenNotFound("GITHUB_TOKEN environment variable not set".to_string())
            })?;

        Ok(Self {
            token,
            repository: repository.into(),
        })
    }

    pub fn from_config(config: &GitHubConfig) -> Result<Self, GitHubError> {
        let repository = non_empty(config.repository.clone())
            .unwrap_or_else(|| DEFAULT_REPOSITORY.to_string());
        Self::new(config.token.clone(), repository)
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"***")
            .field("repository", &self.repository)
            .finish()
    }
}
