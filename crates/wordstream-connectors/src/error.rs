//! Connector error taxonomy.

use crate::config::ConnectorState;

/// Errors raised by source and sink connectors.
///
/// The taxonomy drives the pipeline driver's reaction:
///
/// - [`SourceRead`](Self::SourceRead) is fatal; the driver stops and
///   surfaces it to the caller.
/// - [`SinkWrite`](Self::SinkWrite) with `transient = true` gets one
///   retry; on continued failure (or `transient = false`) it is fatal.
/// - [`MalformedRecord`](Self::MalformedRecord) is recovered locally
///   per the configured strategy: the record is skipped and counted,
///   or the pipeline halts.
#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    /// Fatal read failure from the input source.
    #[error("Source read error: {0}")]
    SourceRead(String),

    /// Write failure from the output sink.
    #[error("Sink write error: {message}")]
    SinkWrite {
        /// What went wrong.
        message: String,
        /// Whether a retry may succeed.
        transient: bool,
    },

    /// The record payload could not be decoded.
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// Invalid or missing connector configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Operation attempted in the wrong lifecycle state.
    #[error("Invalid connector state: expected {expected}, was {actual}")]
    InvalidState {
        /// State the operation requires.
        expected: ConnectorState,
        /// State the connector was in.
        actual: ConnectorState,
    },
}

impl ConnectorError {
    /// Shorthand for a retryable sink failure.
    #[must_use]
    pub fn transient_sink(message: impl Into<String>) -> Self {
        Self::SinkWrite {
            message: message.into(),
            transient: true,
        }
    }

    /// Shorthand for a non-retryable sink failure.
    #[must_use]
    pub fn fatal_sink(message: impl Into<String>) -> Self {
        Self::SinkWrite {
            message: message.into(),
            transient: false,
        }
    }

    /// `true` if retrying the failed operation may succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::SinkWrite { transient: true, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(ConnectorError::transient_sink("full").is_transient());
        assert!(!ConnectorError::fatal_sink("closed").is_transient());
        assert!(!ConnectorError::SourceRead("gone".into()).is_transient());
        assert!(!ConnectorError::MalformedRecord("bad".into()).is_transient());
    }

    #[test]
    fn test_display_messages() {
        let err = ConnectorError::InvalidState {
            expected: ConnectorState::Open,
            actual: ConnectorState::Created,
        };
        assert_eq!(
            err.to_string(),
            "Invalid connector state: expected open, was created"
        );
        assert_eq!(
            ConnectorError::SourceRead("broker gone".into()).to_string(),
            "Source read error: broker gone"
        );
    }
}
