//! # Simulation Log Parser
//!
//! Folds the classified records of a `simulation.log` into a single immutable
//! [`AggregateResult`]. The fold runs once over the whole input; nothing is
//! emitted until every line has been consumed, and the first numeric parse
//! failure aborts the pass.

use crate::{
    defaults,
    error::ParseError,
    record::{parse_line, LogRecord, RequestRecord, RunRecord},
};
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, trace};

/// Everything the report needs from one simulation log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    pub simulation_name: String,
    /// Start time from the `RUN` record; request records never set it.
    pub start_time_ms: Option<i64>,
    /// Latest request end time seen.
    pub end_time_ms: Option<i64>,
    pub total_requests: usize,
    pub successful_requests: usize,
    pub failed_requests: usize,
    pub requests: Vec<RequestRecord>,
}

impl AggregateResult {
    /// Overall run duration in seconds, or 0 when either bound is missing.
    pub fn duration_secs(&self) -> f64 {
        match (self.start_time_ms, self.end_time_ms) {
            (Some(start), Some(end)) => (end as f64 - start as f64) / 1000.0,
            _ => 0.0,
        }
    }

    /// Overall success rate in percent, `None` when no requests were recorded.
    pub fn success_rate_percent(&self) -> Option<f64> {
        if self.total_requests == 0 {
            return None;
        }
        Some(self.successful_requests as f64 / self.total_requests as f64 * 100.0)
    }

    /// Requests per second over the whole run; 0 when the duration is not positive.
    pub fn requests_per_second(&self) -> f64 {
        let duration = self.duration_secs();
        if duration > 0.0 {
            self.total_requests as f64 / duration
        } else {
            0.0
        }
    }
}

/// Running state of the fold. Consumed and returned by value at each step.
#[derive(Debug, Clone)]
struct LogAccumulator {
    simulation_name: String,
    start_time_ms: Option<i64>,
    end_time_ms: Option<i64>,
    successful_requests: usize,
    failed_requests: usize,
    requests: Vec<RequestRecord>,
}

impl Default for LogAccumulator {
    fn default() -> Self {
        Self {
            simulation_name: defaults::SIMULATION_NAME.to_string(),
            start_time_ms: None,
            end_time_ms: None,
            successful_requests: 0,
            failed_requests: 0,
            requests: Vec::new(),
        }
    }
}

impl LogAccumulator {
    fn apply(self, record: LogRecord) -> Self {
        match record {
            LogRecord::Run(run) => self.with_run(run),
            LogRecord::Request(request) => self.with_request(request),
            LogRecord::Unrecognized => self,
        }
    }

    fn with_run(self, run: RunRecord) -> Self {
        debug!(
            "Run record: simulation={} start={}",
            run.simulation_name, run.start_time_ms
        );
        Self {
            simulation_name: run.simulation_name,
            start_time_ms: Some(run.start_time_ms),
            ..self
        }
    }

    fn with_request(mut self, request: RequestRecord) -> Self {
        if request.outcome.is_success() {
            self.successful_requests += 1;
        } else {
            self.failed_requests += 1;
        }
        self.end_time_ms = Some(
            self.end_time_ms
                .map_or(request.end_time_ms, |end| end.max(request.end_time_ms)),
        );
        self.requests.push(request);
        self
    }

    fn finish(self) -> AggregateResult {
        AggregateResult {
            simulation_name: self.simulation_name,
            start_time_ms: self.start_time_ms,
            end_time_ms: self.end_time_ms,
            total_requests: self.requests.len(),
            successful_requests: self.successful_requests,
            failed_requests: self.failed_requests,
            requests: self.requests,
        }
    }
}

/// Parse an in-memory sequence of log lines.
pub fn parse_lines<I, S>(lines: I) -> Result<AggregateResult, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .enumerate()
        .try_fold(LogAccumulator::default(), |acc, (index, line)| {
            let record = parse_line(line.as_ref(), index + 1)?;
            if record == LogRecord::Unrecognized {
                trace!("Skipping line {}", index + 1);
            }
            Ok(acc.apply(record))
        })
        .map(LogAccumulator::finish)
}

/// Parse a log from any buffered reader.
///
/// The reader is drained before any line is classified; a read failure
/// surfaces as [`ParseError::Io`] without a line number.
pub fn parse_reader<R: BufRead>(reader: R) -> Result<AggregateResult, ParseError> {
    let lines = reader.lines().collect::<Result<Vec<_>, _>>()?;
    parse_lines(lines)
}

/// Open and parse a `simulation.log` file.
pub fn parse_log_file(path: &Path) -> Result<AggregateResult, ParseError> {
    let file = File::open(path)?;
    let result = parse_reader(BufReader::new(file))?;
    debug!(
        "Parsed {} requests from {:?} ({} ok, {} failed)",
        result.total_requests, path, result.successful_requests, result.failed_requests
    );
    Ok(result)
}
