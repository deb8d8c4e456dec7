//! # JUnit Report Builder
//!
//! Turns an [`AggregateResult`] into a JUnit `testsuite` document that CI
//! systems can ingest. Each endpoint contributes three testcases:
//!
//! - `<endpoint>_Performance_Test`: average latency as the testcase time, with
//!   a property block and a human-readable `system-out` summary
//! - `<endpoint>_Response_Time_Under_5000ms`: fails when max latency reaches
//!   the ceiling
//! - `<endpoint>_Success_Rate_Above_90_Percent`: fails when the success rate
//!   drops below the floor
//!
//! The suite's `tests` and `failures` attributes are counted from the built
//! tree after all testcases exist, never predicted up front.
//!
//! A log without requests still produces a valid report: an empty suite with
//! zero testcases and the suite-level properties.

use crate::{
    defaults,
    parser::AggregateResult,
    summary::{Assertion, EndpointSummary},
    utils::{format_local_timestamp, format_requests_per_second},
    xml::{self, XmlElement},
};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

const TESTSUITE: &str = "testsuite";
const TESTCASE: &str = "testcase";
const FAILURE: &str = "failure";
const ASSERTION_TIME: &str = "0.001";
const FAILURE_TYPE: &str = "AssertionError";

/// A fully built report tree plus the figures derived while building it.
#[derive(Debug, Clone)]
pub struct JUnitReport {
    pub root: XmlElement,
    pub tests: usize,
    pub failures: usize,
}

impl JUnitReport {
    /// Build the report for one parsed simulation.
    pub fn build(results: &AggregateResult) -> Self {
        let summaries = results.endpoint_summaries();
        debug_assert_eq!(
            summaries.iter().map(EndpointSummary::successes).sum::<usize>(),
            results.successful_requests,
            "endpoint tallies disagree with parser tallies"
        );

        if summaries.is_empty() {
            warn!(
                "No requests recorded for {}; writing an empty report",
                results.simulation_name
            );
        }

        let duration = format!("{:.3}", results.duration_secs());
        let timestamp = results
            .start_time_ms
            .map(format_local_timestamp)
            .unwrap_or_default();

        let mut root = XmlElement::new(TESTSUITE)
            .attr("name", &results.simulation_name)
            .attr("tests", results.total_requests.to_string())
            .attr("failures", results.failed_requests.to_string())
            .attr("errors", "0")
            .attr("skipped", "0")
            .attr("time", &duration)
            .attr("timestamp", timestamp)
            .attr("hostname", defaults::HOSTNAME)
            .attr("package", defaults::PACKAGE);

        for summary in &summaries {
            for testcase in endpoint_testcases(&results.simulation_name, summary) {
                root = root.child(testcase);
            }
        }

        root = root.child(
            properties([
                ("total_requests", results.total_requests.to_string()),
                ("test_duration_seconds", duration),
                (
                    "requests_per_second",
                    format_requests_per_second(results.total_requests, results.duration_secs()),
                ),
            ]),
        );

        // Recount from what was actually emitted.
        let tests = root.children_named(TESTCASE).count();
        let failures = root.count_descendants(FAILURE);
        root.set_attr("tests", tests.to_string());
        root.set_attr("failures", failures.to_string());

        debug!(
            "Built report for {} endpoints: {} testcases, {} failures",
            summaries.len(),
            tests,
            failures
        );

        Self {
            root,
            tests,
            failures,
        }
    }

    /// Serialize the document (declaration included) to a string.
    pub fn to_xml_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        xml::write_document(&self.root, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    /// Write the document to `path`, creating the parent directory if needed.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create report directory {:?}", parent))?;
        }
        let document = self.to_xml_string()?;
        fs::write(path, document)
            .with_context(|| format!("Failed to write JUnit report to {:?}", path))?;

        info!("JUnit XML report written to {:?}", path);
        Ok(())
    }
}

fn endpoint_testcases(classname: &str, summary: &EndpointSummary) -> [XmlElement; 3] {
    let response_time = summary.response_time_assertion();
    let success_rate = summary.success_rate_assertion();

    let performance = testcase(
        classname,
        &format!("{}_Performance_Test", summary.name),
        &format!("{:.3}", summary.average_time_secs()),
    )
    .child(properties([
        ("request_count", summary.count.to_string()),
        ("min_response_time_ms", summary.min_ms().to_string()),
        ("max_response_time_ms", summary.max_ms().to_string()),
        ("avg_response_time_ms", summary.average_ms().to_string()),
        (
            "success_rate_percent",
            format!("{:.1}", summary.success_rate_percent()),
        ),
    ]))
    .child(
        XmlElement::new("system-out").text(system_out(summary, &response_time)),
    );

    [
        performance,
        assertion_testcase(
            classname,
            &format!(
                "{}_Response_Time_Under_{}ms",
                summary.name,
                defaults::MAX_RESPONSE_TIME_MS
            ),
            &response_time,
        ),
        assertion_testcase(
            classname,
            &format!(
                "{}_Success_Rate_Above_{}_Percent",
                summary.name,
                defaults::MIN_SUCCESS_RATE_PERCENT
            ),
            &success_rate,
        ),
    ]
}

fn testcase(classname: &str, name: &str, time: &str) -> XmlElement {
    XmlElement::new(TESTCASE)
        .attr("classname", classname)
        .attr("name", name)
        .attr("time", time)
}

fn assertion_testcase(classname: &str, name: &str, assertion: &Assertion) -> XmlElement {
    let case = testcase(classname, name, ASSERTION_TIME);
    match assertion {
        Assertion::Passed => case,
        Assertion::Failed { message } => case.child(
            XmlElement::new(FAILURE)
                .attr("message", message)
                .attr("type", FAILURE_TYPE),
        ),
    }
}

fn properties<const N: usize>(pairs: [(&str, String); N]) -> XmlElement {
    pairs
        .into_iter()
        .fold(XmlElement::new("properties"), |props, (name, value)| {
            props.child(
                XmlElement::new("property")
                    .attr("name", name)
                    .attr("value", value),
            )
        })
}

/// Fixed text summary. The success-rate line is a strict `>` check, so a rate
/// of exactly the floor reads FAIL here while its assertion testcase passes.
fn system_out(summary: &EndpointSummary, response_time: &Assertion) -> String {
    let rate = summary.success_rate_percent();
    let rate_label = if rate > defaults::MIN_SUCCESS_RATE_PERCENT {
        "PASS"
    } else {
        "FAIL"
    };
    [
        format!("=== Performance Test Results for {} ===", summary.name),
        format!("Total Requests: {}", summary.count),
        format!("Successful Requests: {}", summary.successes()),
        format!("Failed Requests: {}", summary.failures),
        format!("Success Rate: {:.1}%", rate),
        "Response Times (ms):".to_string(),
        format!("  Min: {}", summary.min_ms()),
        format!("  Max: {}", summary.max_ms()),
        format!("  Average: {}", summary.average_ms()),
        "Performance Assertions:".to_string(),
        format!(
            "  Max Response Time < {}ms: {}",
            defaults::MAX_RESPONSE_TIME_MS,
            response_time.label()
        ),
        format!(
            "  Success Rate > {}%: {}",
            defaults::MIN_SUCCESS_RATE_PERCENT,
            rate_label
        ),
    ]
    .join("\n")
}
