use serde::Serialize;

/// Application log level recognized by the event classifier.
///
/// The allow-list is fixed: a `level=` token outside this set is not an
/// event line at all and stays available to later classifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventLevel {
    Info,
    Error,
    Warning,
    Debug,
    Trace,
}

impl EventLevel {
    /// Parse a raw `level=` token. Matching is case-insensitive; summaries
    /// always report the normalized uppercase spelling.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "INFO" => Some(Self::Info),
            "ERROR" => Some(Self::Error),
            "WARNING" => Some(Self::Warning),
            "DEBUG" => Some(Self::Debug),
            "TRACE" => Some(Self::Trace),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
            Self::Debug => "DEBUG",
            Self::Trace => "TRACE",
        }
    }
}

/// One named numeric sample extracted from a metric line.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    pub name: String,
    pub value: f64,
}

/// One HTTP request observation extracted from a request line.
///
/// The route is the raw `request_url` value, no normalization: trailing
/// slashes and query strings produce distinct routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRecord {
    pub route: String,
    pub status: u16,
    pub latency_ms: u64,
}
