//! Binary crate for the `weather-cli` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments and telling city names from coordinates
//! - Human-friendly output formatting
//! - Mapping failures to exit codes

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod format;

#[tokio::main]
async fn main() -> ExitCode {
    // Diagnostics go to stderr so stdout carries only the report.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    match cli::Cli::try_parse() {
        Ok(cmd) => cmd.run().await,
        Err(e) => cli::handle_parse_error(e),
    }
}
