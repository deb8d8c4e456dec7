//! # Report Generation Pipeline
//!
//! Ties the stages together for one invocation:
//!
//! 1. **Locate** the log: an explicit file, or the newest matching run directory
//! 2. **Parse** the whole log into an [`AggregateResult`]
//! 3. **Build** the JUnit tree from it
//! 4. **Write** the report, creating the output directory when needed
//! 5. **Summarize** the run for the console and, optionally, as JSON
//!
//! Parsing finishes before anything is written. A parse failure therefore
//! leaves no report file behind.

use crate::{
    cli::{LogSource, ReportConfig},
    discovery,
    parser::{self, AggregateResult},
    report::JUnitReport,
    results::RunSummary,
};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

/// Runs the log → report pipeline for one configuration.
pub struct ReportGenerator {
    config: ReportConfig,
}

impl ReportGenerator {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Resolve the log file to read.
    pub fn locate_log(&self) -> Result<PathBuf> {
        let path = match self.config.source {
            LogSource::File(ref path) => discovery::existing_log(path.clone())?,
            LogSource::Discover {
                ref results_dir,
                ref prefix,
            } => discovery::find_latest_log(results_dir, prefix)?,
        };
        Ok(path)
    }

    /// Execute the full pipeline and return the run summary.
    pub fn run(&self) -> Result<RunSummary> {
        let log_file = self.locate_log()?;
        info!("Reading simulation log {:?}", log_file);

        let results: AggregateResult = parser::parse_log_file(&log_file)
            .with_context(|| format!("Failed to parse {:?}", log_file))?;
        info!(
            "Parsed {} requests for simulation {}",
            results.total_requests, results.simulation_name
        );

        let report = JUnitReport::build(&results);
        report.write_to(&self.config.output_path)?;

        let summary = RunSummary::new(
            &results,
            &log_file,
            &self.config.output_path,
            report.tests,
            report.failures,
        );
        if let Some(ref json_path) = self.config.summary_json {
            summary.write_json(json_path)?;
        }

        Ok(summary)
    }
}
