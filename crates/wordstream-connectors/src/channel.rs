//! In-process connectors over bounded tokio channels.
//!
//! The only concrete connectors this repository ships: a host pushes
//! [`Record`]s into a [`ChannelSource`] and receives [`CountUpdate`]s
//! from a [`ChannelSink`]. The channels are bounded, so a slow consumer
//! exerts backpressure on the producer and a full sink channel stalls
//! the pipeline driver instead of buffering without limit.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::config::{ConnectorConfig, ConnectorState};
use crate::connector::{SinkConnector, SourceConnector};
use crate::error::ConnectorError;
use crate::record::Record;

/// One `(word, count)` emission delivered through a [`ChannelSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountUpdate {
    /// The counted word.
    pub word: String,
    /// The word's running total.
    pub count: u64,
}

/// Creates a bounded in-process source.
///
/// Returns the producer half (for the host) and the connector half
/// (for the pipeline). End-of-stream is signalled by dropping every
/// cloned sender.
#[must_use]
pub fn channel_source(capacity: usize) -> (mpsc::Sender<Record>, ChannelSource) {
    let (tx, rx) = mpsc::channel(capacity);
    (
        tx,
        ChannelSource {
            rx,
            state: ConnectorState::Created,
        },
    )
}

/// Creates a bounded in-process sink.
///
/// Returns the connector half (for the pipeline) and the consumer half
/// (for the host).
#[must_use]
pub fn channel_sink(capacity: usize) -> (ChannelSink, mpsc::Receiver<CountUpdate>) {
    let (tx, rx) = mpsc::channel(capacity);
    (
        ChannelSink {
            tx,
            state: ConnectorState::Created,
        },
        rx,
    )
}

/// Source connector reading records from an in-process channel.
pub struct ChannelSource {
    rx: mpsc::Receiver<Record>,
    state: ConnectorState,
}

#[async_trait]
impl SourceConnector for ChannelSource {
    async fn open(&mut self, _config: &ConnectorConfig) -> Result<(), ConnectorError> {
        self.state.ensure(ConnectorState::Created)?;
        self.state = ConnectorState::Open;
        Ok(())
    }

    async fn next(&mut self) -> Result<Option<Record>, ConnectorError> {
        self.state.ensure(ConnectorState::Open)?;
        // `None` here means every sender has been dropped: end-of-stream.
        Ok(self.rx.recv().await)
    }

    async fn close(&mut self) -> Result<(), ConnectorError> {
        self.rx.close();
        self.state = ConnectorState::Closed;
        Ok(())
    }

    fn state(&self) -> ConnectorState {
        self.state
    }
}

/// Sink connector forwarding count updates to an in-process channel.
pub struct ChannelSink {
    tx: mpsc::Sender<CountUpdate>,
    state: ConnectorState,
}

#[async_trait]
impl SinkConnector for ChannelSink {
    async fn open(&mut self, _config: &ConnectorConfig) -> Result<(), ConnectorError> {
        self.state.ensure(ConnectorState::Created)?;
        self.state = ConnectorState::Open;
        Ok(())
    }

    async fn emit(&mut self, word: &str, count: u64) -> Result<(), ConnectorError> {
        self.state.ensure(ConnectorState::Open)?;
        self.tx
            .send(CountUpdate {
                word: word.to_owned(),
                count,
            })
            .await
            // A dropped receiver never comes back; retrying won't help.
            .map_err(|_| ConnectorError::fatal_sink("count update receiver dropped"))
    }

    async fn close(&mut self) -> Result<(), ConnectorError> {
        self.state = ConnectorState::Closed;
        Ok(())
    }

    fn state(&self) -> ConnectorState {
        self.state
    }
}
