//! # Gatling JUnit Report Library
//!
//! Converts the tab-delimited `simulation.log` that Gatling writes for every
//! load-test run into a JUnit XML report, so CI systems can show load-test
//! results next to ordinary test results.
//!
//! ## Pipeline
//!
//! - `record`: classifies raw log lines into `RUN` / `REQUEST` / unrecognized records
//! - `parser`: folds the records of one log into an `AggregateResult`
//! - `summary`: groups requests per endpoint and evaluates threshold assertions
//! - `report`: builds the JUnit `testsuite` tree
//! - `xml`: renders the tree as an indented XML document
//! - `discovery`: finds the newest run directory and its log
//! - `generator`: runs the whole pipeline for a `ReportConfig`
//! - `results`: console and JSON run summaries
//!
//! ## Usage Example
//!
//! ```rust
//! use gatling_junit::{parser::parse_lines, report::JUnitReport};
//!
//! let results = parse_lines([
//!     "RUN\tsimulations.Smoke\tsmoke\t1000\tSmoke\t3.11.5",
//!     "REQUEST\t\tHealth Check\t1000\t1012\tOK",
//!     "REQUEST\t\tHealth Check\t1100\t1109\tOK",
//! ])?;
//!
//! let report = JUnitReport::build(&results);
//! assert_eq!(report.tests, 3);
//! assert_eq!(report.failures, 0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Command-line arguments and resolved run configuration
pub mod cli;

/// Locating the newest simulation run and its log file
pub mod discovery;

pub mod error;

/// Report generation pipeline
///
/// `ReportGenerator` locates the log, parses it, writes the JUnit report and
/// produces the run summary. Parsing always completes before the report file
/// is touched.
pub mod generator;

pub mod logging;

/// Folding a simulation log into aggregate statistics
pub mod parser;

/// Line-level record classification
pub mod record;

/// JUnit XML report construction
pub mod report;

/// Console and JSON summaries of a conversion run
pub mod results;

/// Per-endpoint statistics and threshold assertions
pub mod summary;

pub mod utils;

pub mod xml;

pub use cli::{Args, ReportConfig};
pub use error::{DiscoveryError, ParseError};
pub use generator::ReportGenerator;
pub use parser::AggregateResult;
pub use report::JUnitReport;
pub use results::RunSummary;

/// The current version, populated from Cargo.toml and recorded in JSON summaries.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fixed names, paths and thresholds.
pub mod defaults {
    /// Root directory Gatling writes its run directories to
    pub const RESULTS_DIR: &str = "target/gatling";

    /// Run directory name prefix of the API simulation
    pub const SIMULATION_PREFIX: &str = "javaapitestsimulation";

    /// Log file inside each run directory
    pub const LOG_FILE_NAME: &str = "simulation.log";

    /// Subdirectory of the results root that receives the report
    pub const JUNIT_DIR: &str = "junit";

    /// Report file name
    pub const OUTPUT_FILE: &str = "TEST-JavaApiTestSimulation.xml";

    /// Simulation name used when the log has no `RUN` record
    pub const SIMULATION_NAME: &str = "JavaApiTestSimulation";

    pub const HOSTNAME: &str = "localhost";
    pub const PACKAGE: &str = "simulations";

    /// A max latency at or above this fails the response-time assertion.
    pub const MAX_RESPONSE_TIME_MS: f64 = 5000.0;

    /// A success rate strictly below this fails the success-rate assertion.
    pub const MIN_SUCCESS_RATE_PERCENT: f64 = 90.0;
}
