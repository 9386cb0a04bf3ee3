//! Lock-free pipeline metrics.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use wordstream_connectors::ErrorMetrics;

/// Pipeline counters using atomics (no locks on the data path).
///
/// Shared via `Arc` between the driver task and any observer holding a
/// [`PipelineHandle`](crate::PipelineHandle).
#[derive(Debug, Default)]
pub struct PipelineMetrics {
    /// Records pulled from the source.
    pub records_total: AtomicU64,
    /// Tokens produced by the tokenizer.
    pub tokens_total: AtomicU64,
    /// Emissions acknowledged by the sink.
    pub emissions_total: AtomicU64,
    /// Transient sink failures that were retried.
    pub sink_retries_total: AtomicU64,
    /// Decode-error counters, shared with the error router.
    decode: Arc<ErrorMetrics>,
}

impl PipelineMetrics {
    /// Creates zeroed metrics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one record pulled from the source.
    pub fn record_pulled(&self) {
        self.records_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Records one token handed to the aggregator.
    pub fn record_token(&self) {
        self.tokens_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Records one emission acknowledged by the sink.
    pub fn record_emission(&self) {
        self.emissions_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Records one retried transient sink failure.
    pub fn record_sink_retry(&self) {
        self.sink_retries_total.fetch_add(1, Ordering::Relaxed);
    }

    /// The decode-error counters (shared with the error router).
    #[must_use]
    pub fn decode_metrics(&self) -> &Arc<ErrorMetrics> {
        &self.decode
    }

    /// Returns a point-in-time snapshot.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        let decode = self.decode.snapshot();
        MetricsSnapshot {
            records: self.records_total.load(Ordering::Relaxed),
            tokens: self.tokens_total.load(Ordering::Relaxed),
            emissions: self.emissions_total.load(Ordering::Relaxed),
            sink_retries: self.sink_retries_total.load(Ordering::Relaxed),
            malformed: decode.errors_total,
            skipped: decode.skipped_total,
        }
    }
}

/// Point-in-time snapshot of pipeline metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Records pulled from the source.
    pub records: u64,
    /// Tokens produced.
    pub tokens: u64,
    /// Emissions acknowledged by the sink.
    pub emissions: u64,
    /// Retried transient sink failures.
    pub sink_retries: u64,
    /// Malformed records observed.
    pub malformed: u64,
    /// Malformed records skipped.
    pub skipped: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_reflects_counters() {
        let metrics = PipelineMetrics::new();
        metrics.record_pulled();
        metrics.record_token();
        metrics.record_token();
        metrics.record_emission();
        metrics.record_sink_retry();

        let snap = metrics.snapshot();
        assert_eq!(snap.records, 1);
        assert_eq!(snap.tokens, 2);
        assert_eq!(snap.emissions, 1);
        assert_eq!(snap.sink_retries, 1);
        assert_eq!(snap.malformed, 0);
    }
}
