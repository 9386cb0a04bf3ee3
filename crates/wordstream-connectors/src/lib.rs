//! # `WordStream` Connectors
//!
//! External collaborators for streaming records into and count updates
//! out of a `WordStream` pipeline.
//!
//! The pipeline core is protocol-agnostic: it sees a pull-based
//! [`SourceConnector`] delivering opaque [`Record`]s and a
//! [`SinkConnector`] accepting `(word, count)` emissions. This crate
//! defines those traits, the connector lifecycle and error taxonomy,
//! the decode-error strategy, and the in-process channel connectors
//! used to wire a pipeline inside one host. Network transports,
//! consumer-group coordination, and offset tracking live outside this
//! repository.

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod channel;
pub mod config;
pub mod connector;
pub mod error;
pub mod error_handling;
pub mod record;
pub mod testing;

pub use channel::{channel_sink, channel_source, ChannelSink, ChannelSource, CountUpdate};
pub use config::{ConnectorConfig, ConnectorState};
pub use connector::{SinkConnector, SourceConnector};
pub use error::ConnectorError;
pub use error_handling::{ErrorMetrics, ErrorMetricsSnapshot, ErrorRouter, ErrorStrategy};
pub use record::Record;
