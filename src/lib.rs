// Workflow Metrics - weekly consistency-check effectiveness metrics from GitHub
// This exposes the core components for testing and integration

pub mod cli;
pub mod config;
pub mod github;
pub mod metrics;
pub mod observability;
pub mod telemetry;

// Re-export key types for easy access
pub use config::{Credentials, WorkflowMetricsConfig};
pub use github::{GitHubClient, GitHubError, MetricsSource};
pub use metrics::{MetricsCollector, MetricsReport, ReportStorage};
pub use telemetry::{generate_correlation_id, init_telemetry};
