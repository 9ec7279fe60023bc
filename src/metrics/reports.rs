use super::types::MetricsReport;

/// Four-line human summary printed after collection
pub fn format_summary(report: &MetricsReport) -> String {
    let mut output = String::new();

    output.push_str("📊 Metrics Summary:\n");
    output.push_str(&format!(
        "  Issues: {} total, {:.1}% completion rate\n",
        report.issues.total_issues, report.issues.completion_rate
    ));
    output.push_str(&format!(
        "  PRs: {} total, {:.1}% completion rate\n",
        report.pull_requests.total_prs, report.pull_requests.completion_rate
    ));
    output.push_str(&format!(
        "  Red Flags: {} detected\n",
        report.pull_requests.red_flags_detected
    ));
    output.push_str(&format!(
        "  Workflows: {} runs, {:.1}% success rate",
        report.workflow_triggers.total_consistency_check_runs,
        report.workflow_triggers.success_rate
    ));

    output
}

/// Single-line workflow command understood by GitHub Actions runners
pub fn format_actions_output(report: &MetricsReport) -> Result<String, serde_json::Error> {
    Ok(format!("::set-output name=metrics::{}", serde_json::to_string(report)?))
}

/// True when running inside GitHub Actions (`GITHUB_ACTIONS` set and non-empty)
pub fn github_actions_enabled<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    lookup("GITHUB_ACTIONS").is_some_and(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::types::*;
    use chrono::{TimeZone, Utc};

    fn sample_report() -> MetricsReport {
        MetricsReport {
            timestamp: Utc.with_ymd_and_hms(2026, 3, 3, 12, 0, 0).unwrap(),
            repository: "acme/widgets".to_string(),
            period: REPORT_PERIOD.to_string(),
            issues: IssueMetrics {
                total_issues: 10,
                needs_consistency_check: 4,
                consistency_completed: 3,
                completion_rate: 30.0,
            },
            pull_requests: PullRequestMetrics {
                total_prs: 3,
                needs_consistency_check: 1,
                consistency_completed: 1,
                red_flags_detected: 1,
                completion_rate: 100.0 / 3.0,
            },
            workflow_triggers: WorkflowTriggerMetrics::default(),
            labels: LabelMetrics::default(),
        }
    }

    #[test]
    fn summary_has_four_metric_lines() {
        let summary = format_summary(&sample_report());
        let lines: Vec<&str> = summary.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "  Issues: 10 total, 30.0% completion rate");
        assert_eq!(lines[2], "  PRs: 3 total, 33.3% completion rate");
        assert_eq!(lines[3], "  Red Flags: 1 detected");
        assert_eq!(lines[4], "  Workflows: 0 runs, 0.0% success rate");
    }

    #[test]
    fn actions_output_is_single_line_json() {
        let line = format_actions_output(&sample_report()).unwrap();

        assert!(line.starts_with("::set-output name=metrics::{"));
        assert!(!line.contains('\n'));
        assert!(line.contains("\"repository\":\"acme/widgets\""));
    }

    #[test]
    fn actions_flag_requires_non_empty_value() {
        assert!(github_actions_enabled(|_| Some("true".to_string())));
        assert!(!github_actions_enabled(|_| Some(String::new())));
        assert!(!github_actions_enabled(|_| None));
    }
}
