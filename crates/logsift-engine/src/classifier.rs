use regex::Regex;
use tracing::{debug, warn};

use logsift_core::{EventLevel, MetricSample, RequestRecord};

use crate::aggregate::{EventAggregator, MetricAggregator, RequestAggregator};
use crate::summary::Summaries;

/// One domain classifier: pattern-match a raw line and, on success, forward
/// the extracted fields to the owned aggregator.
pub trait LineClassifier {
    /// Returns true when this classifier fully handled the line.
    ///
    /// A pattern match whose field values fail secondary validation (numeric
    /// parse failure, unrecognized level) reports false so the chain keeps
    /// delegating; a partial match never short-circuits the chain.
    fn classify(&mut self, line: &str) -> bool;
}

/// Recognizes `metric=<name>` followed somewhere later by `value=<number>`.
pub struct MetricClassifier {
    pattern: Regex,
    aggregator: MetricAggregator,
}

impl MetricClassifier {
    pub fn new() -> Self {
        Self {
            // metric= must textually precede value=; other fields may sit
            // between and around them.
            pattern: Regex::new(r"\bmetric=(\S+).*?\bvalue=(\d+(?:\.\d+)?)\b").unwrap(),
            aggregator: MetricAggregator::new(),
        }
    }

    pub fn aggregator(&self) -> &MetricAggregator {
        &self.aggregator
    }

    pub fn into_aggregator(self) -> MetricAggregator {
        self.aggregator
    }
}

impl Default for MetricClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl LineClassifier for MetricClassifier {
    fn classify(&mut self, line: &str) -> bool {
        let Some(caps) = self.pattern.captures(line) else {
            return false;
        };
        let name = &caps[1];
        let raw = &caps[2];
        match raw.parse::<f64>() {
            Ok(value) => {
                self.aggregator.record(MetricSample {
                    name: name.to_string(),
                    value,
                });
                true
            }
            Err(_) => {
                warn!(metric = name, value = raw, "metric value failed to parse, delegating line");
                false
            }
        }
    }
}

/// Recognizes `level=<token>` lines whose token is in the fixed allow-list.
pub struct EventClassifier {
    pattern: Regex,
    aggregator: EventAggregator,
}

impl EventClassifier {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"\blevel=(\S+)").unwrap(),
            aggregator: EventAggregator::new(),
        }
    }

    pub fn aggregator(&self) -> &EventAggregator {
        &self.aggregator
    }

    pub fn into_aggregator(self) -> EventAggregator {
        self.aggregator
    }
}

impl Default for EventClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl LineClassifier for EventClassifier {
    fn classify(&mut self, line: &str) -> bool {
        let Some(caps) = self.pattern.captures(line) else {
            return false;
        };
        match EventLevel::from_token(&caps[1]) {
            Some(level) => {
                self.aggregator.record(level);
                true
            }
            None => {
                // A level= field outside the allow-list is not an event
                // line; leave it to the rest of the chain.
                debug!(token = &caps[1], "unrecognized level token, delegating line");
                false
            }
        }
    }
}

/// Recognizes request lines carrying, in relative order, a quoted
/// `request_url`, a `response_status`, and a `response_time_ms` field.
pub struct RequestClassifier {
    pattern: Regex,
    aggregator: RequestAggregator,
}

impl RequestClassifier {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(
                r#"\brequest_url="([^"]+)".*?\bresponse_status=(\d+).*?\bresponse_time_ms=(\d+)\b"#,
            )
            .unwrap(),
            aggregator: RequestAggregator::new(),
        }
    }

    pub fn aggregator(&self) -> &RequestAggregator {
        &self.aggregator
    }

    pub fn into_aggregator(self) -> RequestAggregator {
        self.aggregator
    }
}

impl Default for RequestClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl LineClassifier for RequestClassifier {
    fn classify(&mut self, line: &str) -> bool {
        let Some(caps) = self.pattern.captures(line) else {
            return false;
        };
        let route = &caps[1];
        let (Ok(status), Ok(latency_ms)) = (caps[2].parse::<u16>(), caps[3].parse::<u64>()) else {
            warn!(route, "request status or time failed to parse, delegating line");
            return false;
        };
        self.aggregator.record(RequestRecord {
            route: route.to_string(),
            status,
            latency_ms,
        });
        true
    }
}

/// Fixed-order dispatch over the three domain classifiers: metric first,
/// then event, then request.
pub struct ClassifierChain {
    metric: MetricClassifier,
    event: EventClassifier,
    request: RequestClassifier,
}

impl ClassifierChain {
    pub fn new() -> Self {
        Self {
            metric: MetricClassifier::new(),
            event: EventClassifier::new(),
            request: RequestClassifier::new(),
        }
    }

    /// Offer a line to each classifier in order until one accepts it.
    pub fn classify(&mut self, line: &str) -> bool {
        let classifiers: [&mut dyn LineClassifier; 3] =
            [&mut self.metric, &mut self.event, &mut self.request];
        for classifier in classifiers {
            if classifier.classify(line) {
                return true;
            }
        }
        false
    }

    /// Tear down the chain and derive the three per-domain summaries.
    pub fn into_summaries(self) -> Summaries {
        Summaries {
            apm: self.metric.into_aggregator().summary(),
            application: self.event.into_aggregator().summary(),
            request: self.request.into_aggregator().summary(),
        }
    }
}

impl Default for ClassifierChain {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_line_handled() {
        let mut c = MetricClassifier::new();
        assert!(c.classify("timestamp=2024-02-24T16:22:20Z metric=cpu_usage_percent host=webserver1 value=72.5"));
        let summary = c.into_aggregator().summary();
        assert_eq!(summary["cpu_usage_percent"].max, 72.5);
    }

    #[test]
    fn test_metric_requires_both_fields() {
        let mut c = MetricClassifier::new();
        assert!(!c.classify("metric=cpu_usage_percent host=webserver1"));
        assert!(!c.classify("host=webserver1 value=72.5"));
        // value= before metric= does not match: order is significant.
        assert!(!c.classify("value=72.5 metric=cpu_usage_percent"));
    }

    #[test]
    fn test_metric_integer_value() {
        let mut c = MetricClassifier::new();
        assert!(c.classify("metric=disk_used_gb value=480"));
        assert_eq!(c.aggregator().summary()["disk_used_gb"].minimum, 480.0);
    }

    #[test]
    fn test_metric_non_numeric_value_not_matched() {
        let mut c = MetricClassifier::new();
        assert!(!c.classify("metric=cpu value=high"));
        assert!(c.aggregator().summary().is_empty());
    }

    #[test]
    fn test_event_line_handled_and_normalized() {
        let mut c = EventClassifier::new();
        assert!(c.classify("timestamp=2024-02-24T16:22:25Z level=error message=\"DB timeout\""));
        assert!(c.classify("level=Warning module=auth"));
        let summary = c.into_aggregator().summary();
        assert_eq!(summary["ERROR"], 1);
        assert_eq!(summary["WARNING"], 1);
    }

    #[test]
    fn test_event_level_outside_allow_list_delegates() {
        let mut c = EventClassifier::new();
        assert!(!c.classify("timestamp=2024-02-24T16:22:25Z level=AUDIT user=admin"));
        assert!(c.aggregator().summary().is_empty());
    }

    #[test]
    fn test_request_line_handled() {
        let mut c = RequestClassifier::new();
        assert!(c.classify(
            r#"timestamp=2024-02-24T16:22:25Z request_method=GET request_url="/api/update" response_status=202 host=web1 response_time_ms=34"#
        ));
        let summary = c.into_aggregator().summary();
        let route = &summary["/api/update"];
        assert_eq!(route.status_codes.ok, 1);
        assert_eq!(route.response_times.min, 34);
        assert_eq!(route.response_times.max, 34);
    }

    #[test]
    fn test_request_requires_all_three_fields() {
        let mut c = RequestClassifier::new();
        assert!(!c.classify(r#"request_url="/api/update" response_status=202"#));
        assert!(!c.classify(r#"request_url="/api/update" response_time_ms=34"#));
        assert!(!c.classify("response_status=202 response_time_ms=34"));
    }

    #[test]
    fn test_request_status_overflow_delegates() {
        // 999999 does not fit a status code; structural match, parse failure.
        let mut c = RequestClassifier::new();
        assert!(!c.classify(r#"request_url="/api/update" response_status=999999 response_time_ms=34"#));
        assert!(c.aggregator().summary().is_empty());
    }

    #[test]
    fn test_request_query_string_is_a_distinct_route() {
        let mut c = RequestClassifier::new();
        assert!(c.classify(r#"request_url="/api/users?page=2" response_status=200 response_time_ms=12"#));
        assert!(c.classify(r#"request_url="/api/users" response_status=200 response_time_ms=15"#));
        assert_eq!(c.aggregator().summary().len(), 2);
    }

    #[test]
    fn test_chain_order_metric_wins() {
        // Surface-matches all three domains; the metric classifier sits
        // first in the chain and fully validates, so it takes the line.
        let mut chain = ClassifierChain::new();
        assert!(chain.classify(
            r#"metric=req_time value=10 level=INFO request_url="/a" response_status=200 response_time_ms=10"#
        ));
        let summaries = chain.into_summaries();
        assert_eq!(summaries.apm.len(), 1);
        assert!(summaries.application.is_empty());
        assert!(summaries.request.is_empty());
    }

    #[test]
    fn test_chain_falls_through_on_partial_match() {
        // metric= present but value= missing: the metric classifier passes,
        // the event classifier accepts.
        let mut chain = ClassifierChain::new();
        assert!(chain.classify("metric=cpu level=INFO"));
        let summaries = chain.into_summaries();
        assert!(summaries.apm.is_empty());
        assert_eq!(summaries.application["INFO"], 1);
    }

    #[test]
    fn test_chain_exhausted_reports_unhandled() {
        let mut chain = ClassifierChain::new();
        assert!(!chain.classify("some free-form line without any known field"));
        assert!(!chain.classify("level=AUDIT user=admin"));
    }
}
