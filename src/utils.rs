//! # Formatting Helpers
//!
//! Small formatting functions shared by the report builder and the console
//! summary. They are kept here so that number formatting stays identical
//! between the XML report, the JSON summary and stdout.

use chrono::{Local, TimeZone};

/// Timestamp layout used for the `testsuite` `timestamp` attribute.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Format epoch milliseconds as a local date-time, without zone or fraction.
///
/// ## Examples
///
/// ```rust
/// # use gatling_junit::utils::format_local_timestamp;
/// let ts = format_local_timestamp(1758575836567);
/// assert_eq!(ts.len(), "2025-09-22T21:17:16".len());
/// assert_eq!(&ts[4..5], "-");
/// assert_eq!(&ts[10..11], "T");
/// ```
///
/// Values outside chrono's representable range yield an empty string, the
/// same as a missing start time.
pub fn format_local_timestamp(epoch_ms: i64) -> String {
    Local
        .timestamp_millis_opt(epoch_ms)
        .single()
        .map(|dt| dt.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_default()
}

/// Requests per second with two decimals, or the literal `"0"` when the
/// duration is zero or negative.
pub fn format_requests_per_second(total_requests: usize, duration_secs: f64) -> String {
    if duration_secs > 0.0 {
        format!("{:.2}", total_requests as f64 / duration_secs)
    } else {
        "0".to_string()
    }
}

/// Success rate for console output: two decimals with a percent sign, or
/// `N/A` when there is nothing to rate.
pub fn format_success_rate(rate_percent: Option<f64>) -> String {
    match rate_percent {
        Some(rate) => format!("{:.2}%", rate),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_requests_per_second() {
        assert_eq!(format_requests_per_second(2, 0.4), "5.00");
        assert_eq!(format_requests_per_second(10, 3.0), "3.33");
        assert_eq!(format_requests_per_second(10, 0.0), "0");
        assert_eq!(format_requests_per_second(10, -1.5), "0");
    }

    #[test]
    fn test_format_success_rate() {
        assert_eq!(format_success_rate(Some(50.0)), "50.00%");
        assert_eq!(format_success_rate(Some(100.0)), "100.00%");
        assert_eq!(format_success_rate(None), "N/A");
    }

    #[test]
    fn test_format_local_timestamp_shape() {
        let ts = format_local_timestamp(0);
        // Local zone varies; only the layout is fixed.
        assert_eq!(ts.len(), 19);
        assert!(ts.starts_with("19"));
        assert_eq!(ts.as_bytes()[10], b'T');
        assert_eq!(ts.matches(':').count(), 2);
    }
}
