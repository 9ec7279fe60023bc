use std::time::{Duration, Instant};
use tracing::info;

/// Create the span that groups one collection run
pub fn create_collection_span(repository: &str, correlation_id: &str) -> tracing::Span {
    tracing::info_span!(
        "metrics_collection",
        repository = repository,
        correlation.id = correlation_id
    )
}

/// Time an operation and log its duration when finished
pub struct OperationTimer {
    operation: String,
    start: Instant,
}

impl OperationTimer {
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            start: Instant::now(),
        }
    }

    pub fn finish(self) -> Duration {
        let duration = self.start.elapsed();
        info!(
            operation = %self.operation,
            duration_ms = duration.as_millis() as u64,
            "Operation completed"
        );
        duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_span_records_repository_and_correlation_id() {
        tracing::subscriber::with_default(tracing_subscriber::registry(), || {
            let span = create_collection_span("acme/widgets", "run-1");
            let metadata = span.metadata().unwrap();

            assert_eq!(metadata.name(), "metrics_collection");
            let fields: Vec<&str> = metadata.fields().iter().map(|field| field.name()).collect();
            assert_eq!(fields, vec!["repository", "correlation.id"]);
        });
    }

    #[test]
    fn timer_reports_elapsed_time() {
        let timer = OperationTimer::new("collect_issue_metrics");
        std::thread::sleep(Duration::from_millis(5));
        assert!(timer.finish() >= Duration::from_millis(5));
    }
}
