//! Malformed-record handling strategies.
//!
//! A record whose payload cannot be decoded is either skipped (the
//! pipeline stays live despite bad data) or halts the pipeline. Neither
//! path is silent: every occurrence increments lock-free metrics and
//! logs a `warn`, so a hosting collaborator can alert on them.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ConnectorError;

/// What to do with a record that fails to decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorStrategy {
    /// Skip the record and continue; counted in metrics.
    #[default]
    Skip,
    /// Halt the pipeline on the first malformed record.
    Fail,
}

/// Lock-free decode-error counters, shared via `Arc`.
#[derive(Debug, Default)]
pub struct ErrorMetrics {
    /// Total malformed records observed.
    pub errors_total: AtomicU64,
    /// Malformed records skipped (subset of `errors_total`).
    pub skipped_total: AtomicU64,
}

impl ErrorMetrics {
    /// Creates zeroed metrics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a point-in-time copy.
    #[must_use]
    pub fn snapshot(&self) -> ErrorMetricsSnapshot {
        ErrorMetricsSnapshot {
            errors_total: self.errors_total.load(Ordering::Relaxed),
            skipped_total: self.skipped_total.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`ErrorMetrics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorMetricsSnapshot {
    /// Total malformed records observed.
    pub errors_total: u64,
    /// Malformed records skipped.
    pub skipped_total: u64,
}

/// Applies the configured [`ErrorStrategy`] to decode failures.
pub struct ErrorRouter {
    source_name: String,
    strategy: ErrorStrategy,
    metrics: Arc<ErrorMetrics>,
}

impl ErrorRouter {
    /// Creates a router for `source_name` with the given strategy.
    #[must_use]
    pub fn new(
        source_name: impl Into<String>,
        strategy: ErrorStrategy,
        metrics: Arc<ErrorMetrics>,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            strategy,
            metrics,
        }
    }

    /// Handles one decode failure.
    ///
    /// Always counts the error. Under [`ErrorStrategy::Skip`] the
    /// record is dropped with a `warn` and processing continues.
    ///
    /// # Errors
    ///
    /// Under [`ErrorStrategy::Fail`] the original error is returned so
    /// the pipeline halts.
    pub fn handle(&self, error: ConnectorError) -> Result<(), ConnectorError> {
        self.metrics.errors_total.fetch_add(1, Ordering::Relaxed);
        match self.strategy {
            ErrorStrategy::Skip => {
                self.metrics.skipped_total.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(
                    source = %self.source_name,
                    error = %error,
                    "Skipping malformed record"
                );
                Ok(())
            }
            ErrorStrategy::Fail => Err(error),
        }
    }

    /// The configured strategy.
    #[must_use]
    pub fn strategy(&self) -> ErrorStrategy {
        self.strategy
    }

    /// The shared metrics.
    #[must_use]
    pub fn metrics(&self) -> &Arc<ErrorMetrics> {
        &self.metrics
    }
}
