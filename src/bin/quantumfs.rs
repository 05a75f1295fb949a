//! QuantumFS CLI Binary
//!
//! Runs a line-oriented session over the superposed file stores.

use clap::Parser;
use quantumfs::cli::{map_error, Cli, RunContext};
use quantumfs::config::{ConfigLoader, QuantumFsConfig};
use quantumfs::error::{ApiError, StoreError};
use quantumfs::logging::{init_logging, LoggingConfig};
use std::fs::File;
use std::io::{self, BufReader};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    let logging_config = build_logging_config(&cli, &config);
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("QuantumFS CLI starting");

    let mut context = RunContext::new(&config);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = match cli.script {
        Some(ref path) => match File::open(path) {
            Ok(file) => context.run_session(BufReader::new(file), &mut out),
            Err(e) => Err(ApiError::StoreError(StoreError::IoError(e))),
        },
        None => context.run_session(io::stdin().lock(), &mut out),
    };

    if let Err(e) = result {
        error!("Session failed: {}", e);
        eprintln!("{}", map_error(&e));
        process::exit(1);
    }
}

/// Load configuration and apply CLI overrides for storage and randomness.
/// The result is validated again once the overrides are in place.
fn load_config(cli: &Cli) -> Result<QuantumFsConfig, ApiError> {
    let mut config = match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load(&cli.workspace)?,
    };

    if let Some(ref data_dir) = cli.data_dir {
        config.storage.data_dir = data_dir.clone();
    }
    if cli.seed.is_some() {
        config.randomness.seed = cli.seed;
    }
    ConfigLoader::validated(config)
}

/// Build logging configuration from CLI args on top of the loaded config.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli, config: &QuantumFsConfig) -> LoggingConfig {
    let mut logging = config.logging.clone();

    if cli.quiet {
        logging.enabled = false;
    }
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        logging.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        logging.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        logging.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        logging.file = Some(file.clone());
    }

    logging
}
