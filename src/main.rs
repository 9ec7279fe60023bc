use anyhow::Result;
use clap::Parser;

use workflow_metrics::cli::commands::CollectMetricsCommand;
use workflow_metrics::cli::Cli;
use workflow_metrics::config::WorkflowMetricsConfig;
use workflow_metrics::telemetry::init_telemetry;

fn main() -> Result<()> {
    let cli = Cli::parse();

    WorkflowMetricsConfig::load_env_file()?;
    let mut config = WorkflowMetricsConfig::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    init_telemetry(&config.observability)?;

    tokio::runtime::Runtime::new()?.block_on(async {
        CollectMetricsCommand::new(config).execute().await
    })
}
