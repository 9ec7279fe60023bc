use chrono::{DateTime, Utc};
use tracing::{info, Instrument};

use super::classify::{
    classify_labels, has_red_flag, is_consistency_check_run, is_workflow_label, percentage,
    since_date, ConsistencyStatus,
};
use super::types::{
    IssueMetrics, LabelMetrics, MetricsReport, PullRequestMetrics, WorkflowLabel,
    WorkflowTriggerMetrics, REPORT_PERIOD,
};
use crate::config::DEFAULT_LOOKBACK_DAYS;
use crate::github::{GitHubError, LabeledItem, MetricsSource};
use crate::observability::{create_collection_span, OperationTimer};
use crate::telemetry::generate_correlation_id;

/// Collects the weekly consistency-check metrics for one repository
pub struct MetricsCollector<S: MetricsSource> {
    source: S,
    repository: String,
    lookback_days: i64,
}

#[derive(Debug, Default)]
struct LabelTally {
    total: u64,
    needs_consistency_check: u64,
    consistency_completed: u64,
}

fn tally_labels(items: &[LabeledItem]) -> LabelTally {
    let mut tally = LabelTally {
        total: items.len() as u64,
        ..LabelTally::default()
    };
    for item in items {
        match classify_labels(item.label_names()) {
            ConsistencyStatus::NeedsCheck => tally.needs_consistency_check += 1,
            ConsistencyStatus::Completed => tally.consistency_completed += 1,
            ConsistencyStatus::Untracked => {}
        }
    }
    tally
}

impl<S: MetricsSource> MetricsCollector<S> {
    pub fn new(source: S, repository: impl Into<String>) -> Self {
        Self {
            source,
            repository: repository.into(),
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }

    pub fn with_lookback_days(mut self, lookback_days: i64) -> Self {
        self.lookback_days = lookback_days;
        self
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    fn cutoff(&self) -> String {
        since_date(Utc::now(), self.lookback_days)
    }

    /// Run the four collections in order and assemble the report.
    /// The first failure aborts the run.
    pub async fn collect_metrics(&self) -> Result<MetricsReport, GitHubError> {
        let correlation_id = generate_correlation_id();
        let span = create_collection_span(&self.repository, &correlation_id);

        async {
            println!("🔍 Collecting Development Workflow metrics...");
            let timestamp: DateTime<Utc> = Utc::now();

            let issues = self.collect_issue_metrics().await?;
            let pull_requests = self.collect_pr_metrics().await?;
            let workflow_triggers = self.collect_workflow_metrics().await?;
            let labels = self.collect_label_metrics().await?;

            info!("Metrics collection finished");
            Ok::<_, GitHubError>(MetricsReport {
                timestamp,
                repository: self.repository.clone(),
                period: REPORT_PERIOD.to_string(),
                issues,
                pull_requests,
                workflow_triggers,
                labels,
            })
        }
        .instrument(span)
        .await
    }

    pub async fn collect_issue_metrics(&self) -> Result<IssueMetrics, GitHubError> {
        println!("  📋 Collecting issue metrics...");
        let timer = OperationTimer::new("collect_issue_metrics");

        let issues = self.source.list_issues(&self.cutoff()).await?;
        let tally = tally_labels(&issues);

        let metrics = IssueMetrics {
            total_issues: tally.total,
            needs_consistency_check: tally.needs_consistency_check,
            consistency_completed: tally.consistency_completed,
            completion_rate: percentage(tally.consistency_completed, tally.total),
        };
        info!(
            total = metrics.total_issues,
            needs_check = metrics.needs_consistency_check,
            completed = metrics.consistency_completed,
            "Issue metrics collected"
        );
        timer.finish();
        Ok(metrics)
    }

    pub async fn collect_pr_metrics(&self) -> Result<PullRequestMetrics, GitHubError> {
        println!("  🔄 Collecting PR metrics...");
        let timer = OperationTimer::new("collect_pr_metrics");

        let prs = self.source.list_pull_requests(&self.cutoff()).await?;
        let tally = tally_labels(&prs);
        let red_flags_detected = prs
            .iter()
            .filter(|pr| has_red_flag(pr.body.as_deref()))
            .count() as u64;

        let metrics = PullRequestMetrics {
            total_prs: tally.total,
            needs_consistency_check: tally.needs_consistency_check,
            consistency_completed: tally.consistency_completed,
            red_flags_detected,
            completion_rate: percentage(tally.consistency_completed, tally.total),
        };
        info!(
            total = metrics.total_prs,
            needs_check = metrics.needs_consistency_check,
            completed = metrics.consistency_completed,
            red_flags = metrics.red_flags_detected,
            "Pull request metrics collected"
        );
        timer.finish();
        Ok(metrics)
    }

    pub async fn collect_workflow_metrics(&self) -> Result<WorkflowTriggerMetrics, GitHubError> {
        println!("  ⚡ Collecting workflow metrics...");
        let timer = OperationTimer::new("collect_workflow_metrics");

        let runs = self.source.list_workflow_runs(&self.cutoff()).await?;

        let mut metrics = WorkflowTriggerMetrics::default();
        for run in runs
            .iter()
            .filter(|run| is_consistency_check_run(run.name.as_deref()))
        {
            metrics.total_consistency_check_runs += 1;
            match run.conclusion.as_deref() {
                Some("success") => metrics.successful_runs += 1,
                Some("failure") => metrics.failed_runs += 1,
                _ => {}
            }
        }
        metrics.success_rate =
            percentage(metrics.successful_runs, metrics.total_consistency_check_runs);

        info!(
            runs = metrics.total_consistency_check_runs,
            successful = metrics.successful_runs,
            failed = metrics.failed_runs,
            "Workflow metrics collected"
        );
        timer.finish();
        Ok(metrics)
    }

    pub async fn collect_label_metrics(&self) -> Result<LabelMetrics, GitHubError> {
        println!("  🏷️  Collecting label metrics...");
        let timer = OperationTimer::new("collect_label_metrics");

        let labels = self.source.list_labels().await?;

        let mut details: Vec<WorkflowLabel> = Vec::new();
        for label in labels.into_iter().filter(|label| is_workflow_label(&label.name)) {
            if details.iter().any(|existing| existing.name == label.name) {
                continue;
            }
            details.push(WorkflowLabel {
                name: label.name,
                color: label.color,
                description: label.description.unwrap_or_default(),
                count: 0,
            });
        }

        let workflow_labels: Vec<String> = details.iter().map(|label| label.name.clone()).collect();
        let metrics = LabelMetrics {
            total_workflow_labels: workflow_labels.len() as u64,
            workflow_labels,
            details,
        };
        info!(
            workflow_labels = metrics.total_workflow_labels,
            "Label metrics collected"
        );
        timer.finish();
        Ok(metrics)
    }
}
