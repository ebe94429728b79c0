//! repobrowse CLI Binary
//!
//! Command-line interface for browsing a remote repository directory.

use clap::Parser;
use repobrowse::logging::init_logging;
use repobrowse::tooling::cli::{Cli, CliContext};
use std::process;

fn main() {
    let cli = Cli::parse();

    let mut config = match CliContext::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };

    cli.apply_logging_overrides(&mut config.logging);
    if let Err(e) = init_logging(Some(&config.logging)) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let context = match CliContext::from_config(config, cli.fixture.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error initializing browser: {}", e);
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
