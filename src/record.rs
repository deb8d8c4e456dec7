//! # Log Record Classification
//!
//! Gatling writes `simulation.log` as tab-separated lines whose first field is
//! a record tag. Only two tags matter for reporting:
//!
//! ```text
//! RUN	simulations.JavaApiTestSimulation	javaapitestsimulation	1758575836567	Performance Test Execution	3.11.5
//! REQUEST		Health Check	1758575837624	1758575837633	OK
//! ```
//!
//! [`parse_line`] turns one raw line into a [`LogRecord`]. All shape checks
//! (minimum field counts, tag matching) happen here, so the aggregation step
//! only ever sees well-formed records. Lines that are too short, carry an
//! unknown tag, or are a recognized tag with too few fields collapse into
//! [`LogRecord::Unrecognized`]. Only numeric fields that fail to parse are
//! reported as errors.

use crate::error::ParseError;
use serde::{Deserialize, Serialize};

const RUN_TAG: &str = "RUN";
const REQUEST_TAG: &str = "REQUEST";

/// Status literal Gatling writes for a successful request.
pub const STATUS_OK: &str = "OK";

const MIN_FIELDS: usize = 3;
const MIN_RUN_FIELDS: usize = 4;
const MIN_REQUEST_FIELDS: usize = 6;

/// One classified line of a simulation log.
#[derive(Debug, Clone, PartialEq)]
pub enum LogRecord {
    Run(RunRecord),
    Request(RequestRecord),
    /// Blank, truncated, or a tag the report does not use (`USER`, `GROUP`, ...).
    Unrecognized,
}

/// Metadata from a `RUN` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRecord {
    pub simulation_name: String,
    pub start_time_ms: i64,
}

/// Outcome of a single request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Success,
    Failure { reason: String },
}

impl Outcome {
    /// Classify a raw Gatling status; anything but the exact literal `OK` fails.
    pub fn from_status(status: &str) -> Self {
        if status == STATUS_OK {
            Outcome::Success
        } else {
            Outcome::Failure {
                reason: format!("Request failed with status: {}", status),
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }
}

/// A single timed request from a `REQUEST` line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestRecord {
    pub endpoint: String,
    pub start_time_ms: i64,
    pub end_time_ms: i64,
    pub outcome: Outcome,
}

impl RequestRecord {
    /// Elapsed time in seconds.
    ///
    /// Timestamps are trusted as written; a request that ends before it starts
    /// yields a negative duration. The difference is taken in `f64`, so
    /// timestamps at the ends of the `i64` range cannot overflow.
    pub fn duration_secs(&self) -> f64 {
        (self.end_time_ms as f64 - self.start_time_ms as f64) / 1000.0
    }
}

/// Classify one raw log line.
///
/// `line_number` is 1-based and only used for error reporting.
pub fn parse_line(line: &str, line_number: usize) -> Result<LogRecord, ParseError> {
    let fields: Vec<&str> = line.trim().split('\t').collect();
    if fields.len() < MIN_FIELDS {
        return Ok(LogRecord::Unrecognized);
    }

    match fields[0] {
        RUN_TAG if fields.len() >= MIN_RUN_FIELDS => Ok(LogRecord::Run(RunRecord {
            simulation_name: fields[1].to_string(),
            start_time_ms: parse_millis(fields[3], "run start time", line_number)?,
        })),
        REQUEST_TAG if fields.len() >= MIN_REQUEST_FIELDS => {
            Ok(LogRecord::Request(RequestRecord {
                endpoint: fields[2].to_string(),
                start_time_ms: parse_millis(fields[3], "request start time", line_number)?,
                end_time_ms: parse_millis(fields[4], "request end time", line_number)?,
                outcome: Outcome::from_status(fields[5]),
            }))
        }
        _ => Ok(LogRecord::Unrecognized),
    }
}

fn parse_millis(raw: &str, field: &'static str, line: usize) -> Result<i64, ParseError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ParseError::InvalidNumber {
            line,
            field,
            value: raw.to_string(),
        })
}
