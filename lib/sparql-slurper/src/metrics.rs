use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Counters describing the traffic of a graph with its endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SlurpStats {
    /// Number of pattern matches requested by the caller.
    pub patterns_received: u64,
    /// Number of queries sent to the endpoint.
    pub queries_executed: u64,
    /// Time spent waiting for the endpoint.
    pub total_latency: Duration,
    /// Number of result rows received from the endpoint.
    pub triples_fetched: u64,
}

impl SlurpStats {
    pub fn record_pattern(&mut self) {
        self.patterns_received += 1;
    }

    pub fn record_query(&mut self, latency: Duration, rows: usize) {
        self.queries_executed += 1;
        self.total_latency += latency;
        self.triples_fetched += u64::try_from(rows).unwrap_or(u64::MAX);
    }

    /// Returns the share of pattern matches answered from the local storage.
    #[allow(clippy::cast_precision_loss, reason = "Counters stay far below 2^52")]
    pub fn hit_ratio(&self) -> Option<f64> {
        if self.patterns_received == 0 {
            return None;
        }
        let hits = self.patterns_received.saturating_sub(self.queries_executed);
        Some(hits as f64 / self.patterns_received as f64)
    }
}

impl Display for SlurpStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} patterns, {} queries, {} triples in {:.2} secs",
            self.patterns_received,
            self.queries_executed,
            self.triples_fetched,
            self.total_latency.as_secs_f64()
        )
    }
}
