use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const REPORT_PERIOD: &str = "weekly";

/// One run's worth of workflow metrics. Built once, written once.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricsReport {
    pub timestamp: DateTime<Utc>,
    pub repository: String,
    pub period: String,
    pub issues: IssueMetrics,
    pub pull_requests: PullRequestMetrics,
    pub workflow_triggers: WorkflowTriggerMetrics,
    pub labels: LabelMetrics,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IssueMetrics {
    pub total_issues: u64,
    pub needs_consistency_check: u64,
    pub consistency_completed: u64,
    pub completion_rate: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PullRequestMetrics {
    pub total_prs: u64,
    pub needs_consistency_check: u64,
    pub consistency_completed: u64,
    pub red_flags_detected: u64,
    pub completion_rate: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WorkflowTriggerMetrics {
    pub total_consistency_check_runs: u64,
    pub successful_runs: u64,
    pub failed_runs: u64,
    pub success_rate: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LabelMetrics {
    pub workflow_labels: Vec<String>,
    pub total_workflow_labels: u64,
    /// Full label records, kept in memory only
    #[serde(skip)]
    pub details: Vec<WorkflowLabel>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkflowLabel {
    pub name: String,
    pub color: String,
    pub description: String,
    /// Usage is not counted; always 0.
    pub count: u64,
}
