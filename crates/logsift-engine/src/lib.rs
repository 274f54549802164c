pub mod aggregate;
pub mod classifier;
pub mod stats;
pub mod summary;

pub use classifier::{
    ClassifierChain, EventClassifier, LineClassifier, MetricClassifier, RequestClassifier,
};
pub use summary::Summaries;

use tracing::{debug, warn};

/// A line no classifier accepted, kept for the processing report.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct UnclassifiedLine {
    /// 1-based line number in the input.
    pub line_no: u64,
    pub text: String,
}

/// Outcome of one batch pass over the input.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AnalysisReport {
    pub lines_total: u64,
    pub lines_handled: u64,
    pub unclassified: Vec<UnclassifiedLine>,
    pub summaries: Summaries,
}

/// Single-pass batch driver.
///
/// Feeds lines through the classifier chain in input order and derives the
/// per-domain summaries once the input is exhausted. Holds no global state;
/// every run uses its own instance.
pub struct Analyzer {
    chain: ClassifierChain,
    lines_total: u64,
    lines_handled: u64,
    unclassified: Vec<UnclassifiedLine>,
}

impl Analyzer {
    pub fn new() -> Self {
        Self {
            chain: ClassifierChain::new(),
            lines_total: 0,
            lines_handled: 0,
            unclassified: Vec::new(),
        }
    }

    /// Offer one raw line. Blank lines are counted but never classified.
    pub fn offer(&mut self, line: &str) {
        self.lines_total += 1;
        if line.trim().is_empty() {
            return;
        }
        if self.chain.classify(line) {
            self.lines_handled += 1;
        } else {
            warn!(line_no = self.lines_total, line, "line did not match any classifier");
            self.unclassified.push(UnclassifiedLine {
                line_no: self.lines_total,
                text: line.to_string(),
            });
        }
    }

    /// Consume an in-order sequence of lines.
    pub fn consume<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.offer(line.as_ref());
        }
    }

    /// Finish the pass and derive the summaries.
    pub fn finish(self) -> AnalysisReport {
        debug!(
            total = self.lines_total,
            handled = self.lines_handled,
            unclassified = self.unclassified.len(),
            "analysis pass complete"
        );
        AnalysisReport {
            lines_total: self.lines_total,
            lines_handled: self.lines_handled,
            unclassified: self.unclassified,
            summaries: self.chain.into_summaries(),
        }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}
