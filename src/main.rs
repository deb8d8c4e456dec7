//! # Gatling JUnit Report - Main Entry Point
//!
//! Finds the newest Gatling run, converts its `simulation.log` into a JUnit
//! XML report and prints a short summary.
//!
//! Any failure (missing results directory, no run directories, missing log,
//! unparsable log, unwritable output) is logged and the process exits with
//! status 1. No report is written unless the whole log parsed.

use clap::Parser;
use gatling_junit::{cli::Args, logging, ReportConfig, ReportGenerator};
use std::process::ExitCode;
use tracing::{debug, error};

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    debug!("Configuration: {:?}", args);

    let config = ReportConfig::from(&args);
    match ReportGenerator::new(config).run() {
        Ok(summary) => {
            summary.print();
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
