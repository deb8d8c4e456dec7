use crate::{
    parser::AggregateResult,
    summary::{Assertion, EndpointSummary},
    utils::format_success_rate,
};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Outcome of one conversion run, as printed to stdout and optionally
/// written as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub metadata: RunMetadata,
    pub report_file: PathBuf,
    pub total_requests: usize,
    pub successful_requests: usize,
    pub failed_requests: usize,
    pub success_rate_percent: Option<f64>,
    pub duration_secs: f64,
    pub requests_per_second: f64,
    pub report_tests: usize,
    pub report_failures: usize,
    pub endpoints: Vec<EndpointResult>,
}

/// Provenance of the summary.
#[derive(Debug, Clone, Serialize)]
pub struct RunMetadata {
    pub version: String,
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub simulation_name: String,
    pub log_file: PathBuf,
}

/// Per-endpoint figures and assertion outcomes.
#[derive(Debug, Clone, Serialize)]
pub struct EndpointResult {
    pub name: String,
    pub request_count: usize,
    pub failures: usize,
    pub min_response_time_ms: i64,
    pub max_response_time_ms: i64,
    pub avg_response_time_ms: i64,
    pub success_rate_percent: f64,
    pub response_time_assertion: Assertion,
    pub success_rate_assertion: Assertion,
}

impl From<&EndpointSummary> for EndpointResult {
    fn from(summary: &EndpointSummary) -> Self {
        Self {
            name: summary.name.clone(),
            request_count: summary.count,
            failures: summary.failures,
            min_response_time_ms: summary.min_ms(),
            max_response_time_ms: summary.max_ms(),
            avg_response_time_ms: summary.average_ms(),
            success_rate_percent: summary.success_rate_percent(),
            response_time_assertion: summary.response_time_assertion(),
            success_rate_assertion: summary.success_rate_assertion(),
        }
    }
}

impl RunSummary {
    pub fn new(
        results: &AggregateResult,
        log_file: &Path,
        report_file: &Path,
        report_tests: usize,
        report_failures: usize,
    ) -> Self {
        Self {
            metadata: RunMetadata {
                version: crate::VERSION.to_string(),
                generated_at: chrono::Utc::now(),
                simulation_name: results.simulation_name.clone(),
                log_file: log_file.to_path_buf(),
            },
            report_file: report_file.to_path_buf(),
            total_requests: results.total_requests,
            successful_requests: results.successful_requests,
            failed_requests: results.failed_requests,
            success_rate_percent: results.success_rate_percent(),
            duration_secs: results.duration_secs(),
            requests_per_second: results.requests_per_second(),
            report_tests,
            report_failures,
            endpoints: results
                .endpoint_summaries()
                .iter()
                .map(EndpointResult::from)
                .collect(),
        }
    }

    /// Plain-text summary lines for stdout.
    pub fn console_lines(&self) -> Vec<String> {
        vec![
            format!("JUnit XML report generated: {}", self.report_file.display()),
            format!("Total requests: {}", self.total_requests),
            format!("Successful: {}", self.successful_requests),
            format!("Failed: {}", self.failed_requests),
            format!(
                "Success rate: {}",
                format_success_rate(self.success_rate_percent)
            ),
            format!("Test duration: {:.2} seconds", self.duration_secs),
        ]
    }

    pub fn print(&self) {
        for line in self.console_lines() {
            println!("{}", line);
        }
    }

    /// Write the summary as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write JSON summary to {:?}", path))?;
        info!("JSON summary written to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_lines;
    use tempfile::NamedTempFile;

    fn summary() -> RunSummary {
        let results = parse_lines([
            "RUN\tS\ts\t1000",
            "REQUEST\t\tHealth\t1000\t1200\tOK",
            "REQUEST\t\tHealth\t1300\t1400\tFAIL",
        ])
        .unwrap();
        RunSummary::new(
            &results,
            Path::new("simulation.log"),
            Path::new("junit/TEST-S.xml"),
            3,
            1,
        )
    }

    #[test]
    fn test_console_lines() {
        assert_eq!(
            summary().console_lines(),
            vec![
                "JUnit XML report generated: junit/TEST-S.xml",
                "Total requests: 2",
                "Successful: 1",
                "Failed: 1",
                "Success rate: 50.00%",
                "Test duration: 0.40 seconds",
            ]
        );
    }

    #[test]
    fn test_write_json() {
        let temp_file = NamedTempFile::new().unwrap();
        summary().write_json(temp_file.path()).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(temp_file.path()).unwrap()).unwrap();
        assert_eq!(value["total_requests"], 2);
        assert_eq!(value["report_failures"], 1);
        assert_eq!(value["metadata"]["simulation_name"], "S");
        assert_eq!(value["endpoints"][0]["name"], "Health");
        assert_eq!(
            value["endpoints"][0]["success_rate_assertion"]["result"],
            "failed"
        );
        assert_eq!(
            value["endpoints"][0]["response_time_assertion"]["result"],
            "passed"
        );
    }
}
