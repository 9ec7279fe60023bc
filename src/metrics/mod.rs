// Consistency-check workflow metrics
// Collection, counting rules, summary output and report storage

pub mod classify;
pub mod collector;
pub mod reports;
pub mod storage;
pub mod types;

pub use collector::MetricsCollector;
pub use reports::{format_actions_output, format_summary, github_actions_enabled};
pub use storage::{append_github_output, ReportStorage, StorageError};
pub use types::*;
