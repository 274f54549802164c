use std::collections::BTreeMap;

use serde::Serialize;

/// Derived statistics for one metric name.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricStats {
    pub minimum: f64,
    pub max: f64,
    pub average: f64,
    pub median: f64,
}

/// Metric name → derived statistics. Serializes to `{}` when empty.
pub type MetricSummary = BTreeMap<String, MetricStats>;

/// Normalized level name → occurrence count. Serializes to `{}` when empty.
pub type EventSummary = BTreeMap<String, u64>;

/// Latency band for one route, in whole milliseconds.
///
/// Percentiles use the R-7 method and are truncated (not rounded) to
/// integers. Every field is 0 when the route has no recorded latency; that
/// all-zero shape is a "no data" sentinel, not a measured value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResponseTimeStats {
    pub min: u64,
    pub max: u64,
    #[serde(rename = "50_percentile")]
    pub p50: u64,
    #[serde(rename = "90_percentile")]
    pub p90: u64,
    #[serde(rename = "95_percentile")]
    pub p95: u64,
    #[serde(rename = "99_percentile")]
    pub p99: u64,
}

/// Status-code buckets for one route. All three keys are always emitted,
/// even at zero; codes outside the three ranges are counted nowhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCodeCounts {
    #[serde(rename = "2XX")]
    pub ok: u64,
    #[serde(rename = "4XX")]
    pub client_error: u64,
    #[serde(rename = "5XX")]
    pub server_error: u64,
}

/// Full per-route request summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteSummary {
    pub response_times: ResponseTimeStats,
    pub status_codes: StatusCodeCounts,
}

/// Route → per-route summary. Serializes to `{}` when empty.
pub type RequestSummary = BTreeMap<String, RouteSummary>;

/// The three per-domain summaries produced by one analysis pass.
#[derive(Debug, Clone, Serialize)]
pub struct Summaries {
    pub apm: MetricSummary,
    pub application: EventSummary,
    pub request: RequestSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_time_keys() {
        let stats = ResponseTimeStats {
            min: 1,
            max: 9,
            p50: 3,
            p90: 7,
            p95: 8,
            p99: 9,
        };
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["min"], 1);
        assert_eq!(json["50_percentile"], 3);
        assert_eq!(json["90_percentile"], 7);
        assert_eq!(json["95_percentile"], 8);
        assert_eq!(json["99_percentile"], 9);
        assert_eq!(json["max"], 9);
    }

    #[test]
    fn test_status_code_keys_present_at_zero() {
        let json = serde_json::to_value(StatusCodeCounts::default()).unwrap();
        assert_eq!(json["2XX"], 0);
        assert_eq!(json["4XX"], 0);
        assert_eq!(json["5XX"], 0);
    }

    #[test]
    fn test_empty_summaries_serialize_to_empty_objects() {
        let summaries = Summaries {
            apm: MetricSummary::new(),
            application: EventSummary::new(),
            request: RequestSummary::new(),
        };
        assert_eq!(serde_json::to_string(&summaries.apm).unwrap(), "{}");
        assert_eq!(serde_json::to_string(&summaries.application).unwrap(), "{}");
        assert_eq!(serde_json::to_string(&summaries.request).unwrap(), "{}");
    }
}
