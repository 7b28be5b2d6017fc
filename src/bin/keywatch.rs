//! keywatch CLI Binary
//!
//! Command-line interface and HTTP server for the keywatch store inspector.

use clap::Parser;
use keywatch::cli::{Cli, Commands};
use keywatch::config::ConfigLoader;
use keywatch::logging::{apply_env_overrides, init_logging, LoggingConfig};
use std::process;
use tracing::{debug, error, info};

fn main() {
    let cli = Cli::parse();

    // Build logging config from CLI args, env vars, and config file
    let logging_config = build_logging_config(&cli);

    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    if matches!(cli.command, Commands::Serve { .. }) {
        info!("keywatch server starting");
    } else {
        debug!("keywatch CLI starting");
    }

    match keywatch::cli::run(cli.workspace.clone(), cli.config.clone(), &cli.command) {
        Ok(output) => {
            debug!("Command completed successfully");
            println!("{}", output);
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", keywatch::cli::map_error(&e));
            process::exit(1);
        }
    }
}

/// Build logging configuration from CLI args, environment, and config file.
/// Precedence: CLI flags override environment override config file override defaults.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    build_logging_config_with_env(cli, |name| std::env::var(name).ok())
}

fn build_logging_config_with_env<F>(cli: &Cli, lookup: F) -> LoggingConfig
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = if let Some(ref config_path) = cli.config {
        ConfigLoader::load_from_file(config_path)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default()
    } else {
        ConfigLoader::load(&cli.workspace)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default()
    };

    apply_env_overrides(&mut config, lookup);

    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
        // Keep verbose output visible in the terminal when logging to a file
        if config.output == "file" {
            config.output = "file+stderr".to_string();
        }
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }

    let output_uses_file = config.output == "file" || config.output == "file+stderr";
    if config.enabled && output_uses_file {
        let resolved = keywatch::logging::resolve_log_file_path(
            cli.log_file.clone(),
            config.file.clone(),
            Some(cli.workspace.as_path()),
        );
        if let Ok(path) = resolved {
            config.file = Some(path);
        }
    } else if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    }

    config
}
