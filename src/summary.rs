//! # Endpoint Statistics and Threshold Assertions
//!
//! Groups the parsed requests by endpoint name and derives the per-endpoint
//! figures the report is built from: latency extremes, average latency,
//! success rate, and the two fixed threshold assertions.
//!
//! An [`EndpointSummary`] only comes into existence together with its first
//! request, so `count >= 1` always holds and averages and rates never divide
//! by zero.

use crate::{defaults, parser::AggregateResult, record::RequestRecord};
use serde::Serialize;
use std::collections::HashMap;

/// Accumulated statistics for one endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointSummary {
    pub name: String,
    pub count: usize,
    pub failures: usize,
    pub total_time_secs: f64,
    pub min_time_secs: f64,
    pub max_time_secs: f64,
    /// Individual durations in log order.
    pub times_secs: Vec<f64>,
}

impl EndpointSummary {
    fn from_first(request: &RequestRecord) -> Self {
        let time = request.duration_secs();
        Self {
            name: request.endpoint.clone(),
            count: 1,
            failures: usize::from(!request.outcome.is_success()),
            total_time_secs: time,
            min_time_secs: time,
            max_time_secs: time,
            times_secs: vec![time],
        }
    }

    fn record(&mut self, request: &RequestRecord) {
        let time = request.duration_secs();
        self.count += 1;
        self.total_time_secs += time;
        self.min_time_secs = self.min_time_secs.min(time);
        self.max_time_secs = self.max_time_secs.max(time);
        self.times_secs.push(time);
        if !request.outcome.is_success() {
            self.failures += 1;
        }
    }

    pub fn successes(&self) -> usize {
        self.count - self.failures
    }

    pub fn average_time_secs(&self) -> f64 {
        self.total_time_secs / self.count as f64
    }

    pub fn success_rate_percent(&self) -> f64 {
        self.successes() as f64 / self.count as f64 * 100.0
    }

    /// Latencies truncated to whole milliseconds, as shown in the report.
    pub fn min_ms(&self) -> i64 {
        secs_to_whole_ms(self.min_time_secs)
    }

    pub fn max_ms(&self) -> i64 {
        secs_to_whole_ms(self.max_time_secs)
    }

    pub fn average_ms(&self) -> i64 {
        secs_to_whole_ms(self.average_time_secs())
    }

    /// Fails when the slowest request reached the latency ceiling.
    pub fn response_time_assertion(&self) -> Assertion {
        if self.max_time_secs * 1000.0 >= defaults::MAX_RESPONSE_TIME_MS {
            Assertion::Failed {
                message: format!(
                    "Max response time {}ms exceeds {}ms threshold",
                    self.max_ms(),
                    defaults::MAX_RESPONSE_TIME_MS
                ),
            }
        } else {
            Assertion::Passed
        }
    }

    /// Fails when the success rate drops below the floor; exactly the floor passes.
    pub fn success_rate_assertion(&self) -> Assertion {
        let rate = self.success_rate_percent();
        if rate < defaults::MIN_SUCCESS_RATE_PERCENT {
            Assertion::Failed {
                message: format!(
                    "Success rate {:.1}% is below {}% threshold",
                    rate,
                    defaults::MIN_SUCCESS_RATE_PERCENT
                ),
            }
        } else {
            Assertion::Passed
        }
    }
}

/// Outcome of a threshold check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Assertion {
    Passed,
    Failed { message: String },
}

impl Assertion {
    pub fn passed(&self) -> bool {
        matches!(self, Assertion::Passed)
    }

    pub fn label(&self) -> &'static str {
        if self.passed() {
            "PASS"
        } else {
            "FAIL"
        }
    }
}

/// Group requests by endpoint name, preserving first-seen order.
pub fn group_by_endpoint(requests: &[RequestRecord]) -> Vec<EndpointSummary> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut summaries: Vec<EndpointSummary> = Vec::new();

    for request in requests {
        match index.get(request.endpoint.as_str()) {
            Some(&i) => summaries[i].record(request),
            None => {
                index.insert(&request.endpoint, summaries.len());
                summaries.push(EndpointSummary::from_first(request));
            }
        }
    }

    summaries
}

impl AggregateResult {
    /// Per-endpoint summaries derived from the request sequence.
    pub fn endpoint_summaries(&self) -> Vec<EndpointSummary> {
        group_by_endpoint(&self.requests)
    }
}

/// Truncate seconds to whole milliseconds (toward zero).
pub fn secs_to_whole_ms(secs: f64) -> i64 {
    (secs * 1000.0) as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Outcome;

    fn request(endpoint: &str, start: i64, end: i64, ok: bool) -> RequestRecord {
        RequestRecord {
            endpoint: endpoint.to_string(),
            start_time_ms: start,
            end_time_ms: end,
            outcome: if ok {
                Outcome::Success
            } else {
                Outcome::from_status("KO")
            },
        }
    }

    #[test]
    fn test_group_preserves_first_seen_order() {
        let requests = vec![
            request("B", 0, 10, true),
            request("A", 0, 20, true),
            request("B", 0, 30, false),
        ];
        let groups = group_by_endpoint(&requests);

        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert_eq!(groups[0].count, 2);
        assert_eq!(groups[0].failures, 1);
        assert_eq!(groups[0].times_secs, vec![0.01, 0.03]);
        assert_eq!(groups[1].count, 1);
    }

    #[test]
    fn test_min_max_average() {
        let groups = group_by_endpoint(&[
            request("Health", 1000, 1200, true),
            request("Health", 1300, 1400, true),
            request("Health", 0, 300, true),
        ]);
        let health = &groups[0];

        assert_eq!(health.min_ms(), 100);
        assert_eq!(health.max_ms(), 300);
        assert_eq!(health.average_ms(), 200);
        for t in &health.times_secs {
            assert!(health.min_time_secs <= *t && *t <= health.max_time_secs);
        }
    }

    #[test]
    fn test_response_time_boundary() {
        let at_limit = &group_by_endpoint(&[request("Slow", 0, 5000, true)])[0];
        assert_eq!(
            at_limit.response_time_assertion(),
            Assertion::Failed {
                message: "Max response time 5000ms exceeds 5000ms threshold".to_string()
            }
        );

        let under = &group_by_endpoint(&[request("Fast", 0, 4999, true)])[0];
        assert!(under.response_time_assertion().passed());
    }

    #[test]
    fn test_success_rate_boundary() {
        // 9 of 10 succeed: exactly 90.0% passes.
        let mut requests: Vec<RequestRecord> =
            (0..9).map(|i| request("Users", i, i + 10, true)).collect();
        requests.push(request("Users", 0, 10, false));
        let at_floor = &group_by_endpoint(&requests)[0];
        assert_eq!(at_floor.success_rate_percent(), 90.0);
        assert!(at_floor.success_rate_assertion().passed());

        // 8 of 10 succeed.
        requests[0] = request("Users", 0, 10, false);
        let below = &group_by_endpoint(&requests)[0];
        assert_eq!(
            below.success_rate_assertion(),
            Assertion::Failed {
                message: "Success rate 80.0% is below 90% threshold".to_string()
            }
        );
    }

    #[test]
    fn test_endpoint_tallies_match_parser_tallies() {
        let result = crate::parser::parse_lines([
            "RUN\tS\ts\t1000",
            "REQUEST\t\tHealth\t1000\t1200\tOK",
            "REQUEST\t\tUsers\t1000\t1100\tKO",
            "REQUEST\t\tHealth\t1300\t1400\tFAIL",
            "REQUEST\t\tUsers\t1200\t1250\tOK",
        ])
        .unwrap();
        let summaries = result.endpoint_summaries();

        let successes: usize = summaries.iter().map(EndpointSummary::successes).sum();
        let failures: usize = summaries.iter().map(|s| s.failures).sum();
        assert_eq!(successes, result.successful_requests);
        assert_eq!(failures, result.failed_requests);
        assert_eq!(successes + failures, result.total_requests);
    }
}
