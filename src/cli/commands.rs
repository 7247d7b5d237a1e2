//! Command implementations

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::app::{AppContainer, DefaultAppContainer, RunOptions, RunReport};
use crate::cli::Cli;
use crate::config_initialization::initialize_configuration_hierarchy;
use crate::utils::logging::init_logging;

/// Execute a parsed command line
pub async fn execute(cli: Cli) -> Result<()> {
    let loaded =
        initialize_configuration_hierarchy(&cli).context("Failed to load configuration")?;
    init_logging(&loaded.config.logging).context("Failed to initialize logging")?;

    info!("Starting reencoder");
    loaded.log_origin();
    info!("Input: {}", cli.input.display());

    let container = DefaultAppContainer::new(Arc::new(loaded.config));
    let options = RunOptions {
        dry_run: cli.run.dry_run,
    };

    let result = if cli.run.copy {
        container.copy_interactor().copy(&cli.input, options).await
    } else {
        container.encode_interactor().run(&cli.input, options).await
    };

    let operation = if cli.run.copy { "copy" } else { "encode" };
    let report = match result {
        Ok(report) => report,
        Err(e) => {
            error!("Failed to {} {}: {}", operation, cli.input.display(), e);
            return Err(anyhow::Error::new(e)
                .context(format!("Failed to {} {}", operation, cli.input.display())));
        }
    };

    print_report(&report, cli.run.json)?;
    info!("reencoder completed successfully");
    Ok(())
}

fn print_report(report: &RunReport, json: bool) -> Result<()> {
    if json {
        let rendered =
            serde_json::to_string_pretty(report).context("Failed to serialize run report")?;
        println!("{}", rendered);
    } else {
        println!("{}", report);
    }
    Ok(())
}
