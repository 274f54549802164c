use std::collections::{BTreeMap, HashMap};

use logsift_core::{EventLevel, MetricSample, RequestRecord};

use crate::stats;
use crate::summary::{
    EventSummary, MetricStats, MetricSummary, RequestSummary, ResponseTimeStats, RouteSummary,
    StatusCodeCounts,
};

/// Accumulates named numeric samples for the metric domain.
///
/// Samples only ever accumulate; summaries are derived from scratch at
/// query time, never cached incrementally.
#[derive(Debug, Default)]
pub struct MetricAggregator {
    samples: BTreeMap<String, Vec<f64>>,
}

impl MetricAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, sample: MetricSample) {
        self.samples.entry(sample.name).or_default().push(sample.value);
    }

    /// Derive the per-metric summary. Names without samples are omitted.
    pub fn summary(&self) -> MetricSummary {
        let mut out = MetricSummary::new();
        for (name, values) in &self.samples {
            if values.is_empty() {
                continue;
            }
            let mut sorted = values.clone();
            sorted.sort_by(|a, b| a.total_cmp(b));
            out.insert(
                name.clone(),
                MetricStats {
                    minimum: sorted[0],
                    max: sorted[sorted.len() - 1],
                    average: stats::mean(&sorted),
                    median: stats::median_sorted(&sorted),
                },
            );
        }
        out
    }
}

/// Counts application events per recognized level. Counters only grow.
#[derive(Debug, Default)]
pub struct EventAggregator {
    counts: HashMap<EventLevel, u64>,
}

impl EventAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, level: EventLevel) {
        *self.counts.entry(level).or_default() += 1;
    }

    pub fn summary(&self) -> EventSummary {
        self.counts
            .iter()
            .map(|(level, count)| (level.as_str().to_string(), *count))
            .collect()
    }
}

/// Grow-only latency and status collections for a single route.
#[derive(Debug, Default)]
pub struct RouteStats {
    latencies: Vec<u64>,
    statuses: Vec<u16>,
}

impl RouteStats {
    fn add(&mut self, status: u16, latency_ms: u64) {
        self.latencies.push(latency_ms);
        self.statuses.push(status);
    }

    /// Latency band for this route. With no recorded latency this is the
    /// all-zero sentinel documented on [`ResponseTimeStats`].
    pub fn response_times(&self) -> ResponseTimeStats {
        if self.latencies.is_empty() {
            return ResponseTimeStats::default();
        }
        let mut sorted = self.latencies.clone();
        sorted.sort_unstable();
        ResponseTimeStats {
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            p50: stats::percentile_r7_sorted(&sorted, 50) as u64,
            p90: stats::percentile_r7_sorted(&sorted, 90) as u64,
            p95: stats::percentile_r7_sorted(&sorted, 95) as u64,
            p99: stats::percentile_r7_sorted(&sorted, 99) as u64,
        }
    }

    /// Bucket recorded status codes into 2XX / 4XX / 5XX. Codes outside
    /// the three ranges (1XX, 3XX, 6XX and up) are skipped.
    pub fn status_codes(&self) -> StatusCodeCounts {
        let mut counts = StatusCodeCounts::default();
        for &code in &self.statuses {
            match code {
                200..=299 => counts.ok += 1,
                400..=499 => counts.client_error += 1,
                500..=599 => counts.server_error += 1,
                _ => {}
            }
        }
        counts
    }
}

/// Accumulates request records grouped by route.
#[derive(Debug, Default)]
pub struct RequestAggregator {
    routes: BTreeMap<String, RouteStats>,
}

impl RequestAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, record: RequestRecord) {
        let stats = self.routes.entry(record.route).or_default();
        stats.add(record.status, record.latency_ms);
    }

    pub fn summary(&self) -> RequestSummary {
        self.routes
            .iter()
            .map(|(route, stats)| {
                (
                    route.clone(),
                    RouteSummary {
                        response_times: stats.response_times(),
                        status_codes: stats.status_codes(),
                    },
                )
            })
            .collect()
    }
}
