//! `merkle` command-line entry point

use anyhow::Context;
use clap::Parser;
use merkle::cli::{map_error, Cli, RunContext};
use merkle::config::ConfigLoader;
use merkle::error::ApiError;
use merkle::logging::{init_logging, LoggingConfig, LoggingOverrides};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(Some(&logging_for(&cli))) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }
    info!(command = ?std::env::args().nth(1), "merkle invoked");

    let output = match run(&cli) {
        Ok(output) => output,
        Err(e) => {
            error!("Command failed: {:#}", e);
            let message = e
                .downcast_ref::<ApiError>()
                .map(map_error)
                .unwrap_or_else(|| format!("{:#}", e));
            eprintln!("{}", message);
            process::exit(1);
        }
    };
    println!("{}", output);
}

fn run(cli: &Cli) -> anyhow::Result<String> {
    let context = RunContext::new(cli.workspace.clone(), cli.config.clone())
        .with_context(|| format!("Failed to load configuration for {}", cli.workspace.display()))?;
    Ok(context.execute(&cli.command)?)
}

/// Logging stays silent unless `--verbose`; the `--log-*` flags win over
/// whatever the configuration files say.
fn logging_for(cli: &Cli) -> LoggingConfig {
    if !cli.verbose {
        return LoggingConfig::silent();
    }

    let loaded = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(&cli.workspace),
    };
    let overrides = LoggingOverrides {
        level: cli.log_level.clone(),
        format: cli.log_format.clone(),
        output: cli.log_output.clone(),
        file: cli.log_file.clone(),
    };
    loaded
        .map(|config| config.logging)
        .unwrap_or_default()
        .with_overrides(&overrides)
}
