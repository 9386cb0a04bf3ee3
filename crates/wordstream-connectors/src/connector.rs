//! Source and sink connector traits.
//!
//! Both traits are object-safe (`Box<dyn SourceConnector>`,
//! `Box<dyn SinkConnector>`) and lifecycle-managed: `open()` acquires
//! the external resource, `close()` releases it, and the pipeline
//! driver guarantees `close()` runs on every exit path.

use async_trait::async_trait;

use crate::config::{ConnectorConfig, ConnectorState};
use crate::error::ConnectorError;
use crate::record::Record;

/// Pull-based input source.
///
/// Delivery semantics are the source's responsibility: the pipeline
/// assumes at-least-once delivery and leaves offset tracking and replay
/// to the connector (keyed by the host's stable pipeline identity).
#[async_trait]
pub trait SourceConnector: Send {
    /// Acquires the underlying resource.
    ///
    /// # Errors
    ///
    /// Returns a [`ConnectorError`] if the source cannot be opened or
    /// the config is invalid.
    async fn open(&mut self, config: &ConnectorConfig) -> Result<(), ConnectorError>;

    /// Pulls the next record, suspending while none is available.
    ///
    /// `Ok(Some(record))` delivers one record; `Ok(None)` is
    /// end-of-stream and terminal.
    ///
    /// Must be cancellation-safe: the driver drops an in-flight call
    /// when it observes a stop signal, and no record may be lost when
    /// that happens.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::SourceRead`] on a fatal read failure.
    async fn next(&mut self) -> Result<Option<Record>, ConnectorError>;

    /// Releases the underlying resource.
    ///
    /// # Errors
    ///
    /// Returns a [`ConnectorError`] if releasing fails; the connector
    /// is considered closed regardless.
    async fn close(&mut self) -> Result<(), ConnectorError>;

    /// Current lifecycle state.
    fn state(&self) -> ConnectorState;
}

/// Ack-per-update output sink.
#[async_trait]
pub trait SinkConnector: Send {
    /// Acquires the underlying resource.
    ///
    /// # Errors
    ///
    /// Returns a [`ConnectorError`] if the sink cannot be opened or the
    /// config is invalid.
    async fn open(&mut self, config: &ConnectorConfig) -> Result<(), ConnectorError>;

    /// Forwards one `(word, count)` update downstream.
    ///
    /// Returning `Ok(())` acknowledges the update.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::SinkWrite`]; `transient = true` means
    /// the driver may retry the same update.
    async fn emit(&mut self, word: &str, count: u64) -> Result<(), ConnectorError>;

    /// Releases the underlying resource.
    ///
    /// # Errors
    ///
    /// Returns a [`ConnectorError`] if releasing fails; the connector
    /// is considered closed regardless.
    async fn close(&mut self) -> Result<(), ConnectorError>;

    /// Current lifecycle state.
    fn state(&self) -> ConnectorState;
}
