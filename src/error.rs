//! Typed errors raised by the library.
//!
//! Orchestration code (the binary and [`crate::generator::ReportGenerator`]) wraps these in
//! `anyhow::Error` with additional context; library callers can match on the
//! variants directly.

use std::path::PathBuf;
use thiserror::Error;

/// Failure while reading or parsing a simulation log.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A field that must hold epoch milliseconds was not an integer.
    #[error("line {line}: invalid {field} '{value}' (expected integer milliseconds)")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("failed to read simulation log: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure while locating the simulation log on disk.
///
/// Every variant maps to exit code 1 in the binary.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Gatling results directory not found: {}", .0.display())]
    ResultsDirMissing(PathBuf),

    #[error("No Gatling simulation results found in {} (prefix '{prefix}')", dir.display())]
    NoSimulationRuns { dir: PathBuf, prefix: String },

    #[error("simulation.log not found in {}", .0.display())]
    LogFileMissing(PathBuf),

    #[error("failed to scan {}: {source}", dir.display())]
    Scan {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
