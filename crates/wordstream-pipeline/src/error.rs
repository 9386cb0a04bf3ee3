//! Error types for the pipeline facade.

use wordstream_connectors::ConnectorError;

/// Errors surfaced by a running pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The input source failed fatally (read failure, or a malformed
    /// record under the `Fail` strategy).
    #[error("Source error: {0}")]
    Source(ConnectorError),

    /// The output sink rejected an emission past the retry budget.
    #[error("Sink error: {0}")]
    Sink(ConnectorError),

    /// A connector failed to open or close.
    #[error("Connector error: {0}")]
    Connector(ConnectorError),

    /// Invalid pipeline construction.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The driver task itself failed (panic or cancellation).
    #[error("Pipeline task error: {0}")]
    Runtime(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_wraps_connector_error() {
        let err = PipelineError::Sink(ConnectorError::transient_sink("queue full"));
        assert_eq!(err.to_string(), "Sink error: Sink write error: queue full");
    }
}
