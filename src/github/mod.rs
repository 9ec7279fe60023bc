pub mod client;
pub mod errors;
pub mod types;

pub use client::{GitHubClient, MetricsSource};
pub use errors::GitHubError;
pub use types::{LabelRef, LabeledItem, RepoLabel, WorkflowRunRecord, WorkflowRunsPage};
