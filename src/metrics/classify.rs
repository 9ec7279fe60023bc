//! Counting rules for the consistency-check workflow.
//!
//! Everything here is pure so the collector can stay a thin loop over API
//! results.

use chrono::{DateTime, Duration, Utc};
use regex::Regex;
use std::sync::OnceLock;

pub const NEEDS_CHECK_LABEL: &str = "needs-consistency-check";
pub const COMPLETED_LABEL: &str = "consistency-check-completed";
pub const CONSISTENCY_RUN_MARKER: &str = "consistency-check";
pub const WORKFLOW_LABEL_KEYWORDS: [&str; 3] = ["consistency", "workflow", "needs"];

/// Phrases in a PR description that suggest required checks are being talked around
pub const RED_FLAG_PHRASES: [&str; 5] = [
    "doesn't need user roles",
    "doesn't need to test",
    "different framework",
    "skip authorization",
    "no need for permissions",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsistencyStatus {
    NeedsCheck,
    Completed,
    Untracked,
}

/// Classify an item by its tracking labels. `NeedsCheck` wins when both are present.
pub fn classify_labels<'a, I>(labels: I) -> ConsistencyStatus
where
    I: IntoIterator<Item = &'a str>,
{
    let mut completed = false;
    for label in labels {
        if label == NEEDS_CHECK_LABEL {
            return ConsistencyStatus::NeedsCheck;
        }
        if label == COMPLETED_LABEL {
            completed = true;
        }
    }

    if completed {
        ConsistencyStatus::Completed
    } else {
        ConsistencyStatus::Untracked
    }
}

static RED_FLAG_PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();

fn red_flag_patterns() -> &'static Vec<Regex> {
    RED_FLAG_PATTERNS.get_or_init(|| {
        RED_FLAG_PHRASES
            .iter()
            .filter_map(|phrase| Regex::new(&format!("(?i){}", regex::escape(phrase))).ok())
            .collect()
    })
}

/// True when the description contains any red-flag phrase, ignoring case.
/// A missing or empty description never matches.
pub fn has_red_flag(body: Option<&str>) -> bool {
    match body {
        Some(body) if !body.is_empty() => {
            red_flag_patterns().iter().any(|pattern| pattern.is_match(body))
        }
        _ => false,
    }
}

pub fn is_consistency_check_run(name: Option<&str>) -> bool {
    name.map(|name| name.to_lowercase().contains(CONSISTENCY_RUN_MARKER))
        .unwrap_or(false)
}

pub fn is_workflow_label(name: &str) -> bool {
    let name = name.to_lowercase();
    WORKFLOW_LABEL_KEYWORDS
        .iter()
        .any(|keyword| name.contains(keyword))
}

/// `part / total * 100`, or exactly 0 when there is nothing to divide by.
pub fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Start of the activity window as `YYYY-MM-DD` (UTC).
pub fn since_date(now: DateTime<Utc>, lookback_days: i64) -> String {
    (now - Duration::days(lookback_days))
        .format("%Y-%m-%d")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    #[test]
    fn needs_check_takes_precedence() {
        assert_eq!(
            classify_labels([COMPLETED_LABEL, NEEDS_CHECK_LABEL]),
            ConsistencyStatus::NeedsCheck
        );
        assert_eq!(
            classify_labels([NEEDS_CHECK_LABEL, COMPLETED_LABEL]),
            ConsistencyStatus::NeedsCheck
        );
        assert_eq!(classify_labels(["bug", COMPLETED_LABEL]), ConsistencyStatus::Completed);
        assert_eq!(classify_labels(["bug"]), ConsistencyStatus::Untracked);
        assert_eq!(classify_labels(Vec::<&str>::new()), ConsistencyStatus::Untracked);
    }

    #[test]
    fn label_match_is_exact() {
        assert_eq!(
            classify_labels(["Needs-Consistency-Check"]),
            ConsistencyStatus::Untracked
        );
    }

    #[test]
    fn red_flags_ignore_case() {
        assert!(has_red_flag(Some("This feature doesn't need user roles since it's internal")));
        assert!(has_red_flag(Some("We can SKIP AUTHORIZATION here")));
        assert!(has_red_flag(Some("uses a Different Framework")));
        assert!(!has_red_flag(Some("Adds role checks and tests")));
        assert!(!has_red_flag(Some("")));
        assert!(!has_red_flag(None));
    }

    #[test]
    fn run_names_match_case_insensitively() {
        assert!(is_consistency_check_run(Some("Consistency-Check / verify")));
        assert!(is_consistency_check_run(Some("nightly consistency-check")));
        assert!(!is_consistency_check_run(Some("consistency check")));
        assert!(!is_consistency_check_run(Some("build")));
        assert!(!is_consistency_check_run(None));
    }

    #[test]
    fn workflow_label_keywords() {
        assert!(is_workflow_label("Needs-Triage"));
        assert!(is_workflow_label("consistency-check-completed"));
        assert!(is_workflow_label("WORKFLOW:blocked"));
        assert!(!is_workflow_label("bug"));
    }

    #[test]
    fn percentage_handles_empty_denominator() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(3, 10), 30.0);
        assert_eq!(percentage(2, 2), 100.0);
    }

    #[test]
    fn since_date_is_seven_days_back() {
        let now = Utc.with_ymd_and_hms(2026, 3, 3, 1, 30, 0).unwrap();
        assert_eq!(since_date(now, 7), "2026-02-24");
        assert_eq!(since_date(now, 1), "2026-03-02");
    }

    proptest! {
        #[test]
        fn percentage_stays_in_range(total in 0u64..10_000, part_seed in 0u64..10_000) {
            let part = if total == 0 { 0 } else { part_seed % (total + 1) };
            let rate = percentage(part, total);
            prop_assert!(rate.is_finite());
            prop_assert!((0.0..=100.0).contains(&rate));
            if total == 0 {
                prop_assert_eq!(rate, 0.0);
            }
        }

        #[test]
        fn classification_is_exclusive(labels in proptest::collection::vec(
            prop_oneof![
                Just(NEEDS_CHECK_LABEL.to_string()),
                Just(COMPLETED_LABEL.to_string()),
                "[a-z-]{1,12}",
            ],
            0..6,
        )) {
            let status = classify_labels(labels.iter().map(String::as_str));
            let has_needs = labels.iter().any(|l| l == NEEDS_CHECK_LABEL);
            let has_completed = labels.iter().any(|l| l == COMPLETED_LABEL);

            let expected = if has_needs {
                ConsistencyStatus::NeedsCheck
            } else if has_completed {
                ConsistencyStatus::Completed
            } else {
                ConsistencyStatus::Untracked
            };
            prop_assert_eq!(status, expected);
        }
    }
}
