pub mod metrics;

pub use metrics::CollectMetricsCommand;
