//! Test doubles for pipeline and connector tests.
//!
//! Used by this workspace's unit and integration tests; exported so
//! downstream hosts can drive a pipeline without a real transport.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::config::{ConnectorConfig, ConnectorState};
use crate::connector::{SinkConnector, SourceConnector};
use crate::error::ConnectorError;
use crate::record::Record;

/// Source that yields a scripted record sequence, then end-of-stream —
/// or a fatal read error, if one was injected.
pub struct MockSource {
    records: VecDeque<Record>,
    fail_after: Option<String>,
    next_calls: Arc<AtomicU64>,
    state: ConnectorState,
}

impl MockSource {
    /// Creates a source over explicit records.
    #[must_use]
    pub fn with_records(records: Vec<Record>) -> Self {
        Self {
            records: records.into(),
            fail_after: None,
            next_calls: Arc::new(AtomicU64::new(0)),
            state: ConnectorState::Created,
        }
    }

    /// Creates a source over one text record per line.
    #[must_use]
    pub fn with_lines(lines: &[&str]) -> Self {
        Self::with_records(lines.iter().copied().map(Record::from).collect())
    }

    /// After the scripted records, report a fatal read error instead of
    /// end-of-stream.
    #[must_use]
    pub fn then_fail(mut self, message: impl Into<String>) -> Self {
        self.fail_after = Some(message.into());
        self
    }

    /// Shared counter of `next()` calls, for asserting that a stopped
    /// driver pulls no further input.
    #[must_use]
    pub fn next_calls(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.next_calls)
    }
}

#[async_trait]
impl SourceConnector for MockSource {
    async fn open(&mut self, _config: &ConnectorConfig) -> Result<(), ConnectorError> {
        self.state.ensure(ConnectorState::Created)?;
        self.state = ConnectorState::Open;
        Ok(())
    }

    async fn next(&mut self) -> Result<Option<Record>, ConnectorError> {
        self.state.ensure(ConnectorState::Open)?;
        self.next_calls.fetch_add(1, Ordering::Relaxed);
        if let Some(record) = self.records.pop_front() {
            return Ok(Some(record));
        }
        match self.fail_after.take() {
            Some(message) => Err(ConnectorError::SourceRead(message)),
            None => Ok(None),
        }
    }

    async fn close(&mut self) -> Result<(), ConnectorError> {
        self.state = ConnectorState::Closed;
        Ok(())
    }

    fn state(&self) -> ConnectorState {
        self.state
    }
}

/// Sink that records every emission into a shared, cloneable buffer.
pub struct CollectingSink {
    updates: Arc<Mutex<Vec<(String, u64)>>>,
    state: ConnectorState,
}

impl Default for CollectingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl CollectingSink {
    /// Creates an empty collecting sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            updates: Arc::new(Mutex::new(Vec::new())),
            state: ConnectorState::Created,
        }
    }

    /// Shared handle to the collected emissions.
    #[must_use]
    pub fn collected(&self) -> Arc<Mutex<Vec<(String, u64)>>> {
        Arc::clone(&self.updates)
    }
}

#[async_trait]
impl SinkConnector for CollectingSink {
    async fn open(&mut self, _config: &ConnectorConfig) -> Result<(), ConnectorError> {
        self.state.ensure(ConnectorState::Created)?;
        self.state = ConnectorState::Open;
        Ok(())
    }

    async fn emit(&mut self, word: &str, count: u64) -> Result<(), ConnectorError> {
        self.state.ensure(ConnectorState::Open)?;
        self.updates.lock().push((word.to_owned(), count));
        Ok(())
    }

    async fn close(&mut self) -> Result<(), ConnectorError> {
        self.state = ConnectorState::Closed;
        Ok(())
    }

    fn state(&self) -> ConnectorState {
        self.state
    }
}

/// Sink that fails the first `failures` emits transiently, then
/// collects like [`CollectingSink`]. Every attempt is counted, so retry
/// behavior is observable.
pub struct FlakySink {
    failures_remaining: u64,
    attempts: Arc<AtomicU64>,
    updates: Arc<Mutex<Vec<(String, u64)>>>,
    state: ConnectorState,
}

impl FlakySink {
    /// Creates a sink whose first `failures` emit attempts fail with a
    /// transient [`ConnectorError::SinkWrite`].
    #[must_use]
    pub fn new(failures: u64) -> Self {
        Self {
            failures_remaining: failures,
            attempts: Arc::new(AtomicU64::new(0)),
            updates: Arc::new(Mutex::new(Vec::new())),
            state: ConnectorState::Created,
        }
    }

    /// Shared counter of emit attempts (including failed ones).
    #[must_use]
    pub fn attempts(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.attempts)
    }

    /// Shared handle to the successfully collected emissions.
    #[must_use]
    pub fn collected(&self) -> Arc<Mutex<Vec<(String, u64)>>> {
        Arc::clone(&self.updates)
    }
}

#[async_trait]
impl SinkConnector for FlakySink {
    async fn open(&mut self, _config: &ConnectorConfig) -> Result<(), ConnectorError> {
        self.state.ensure(ConnectorState::Created)?;
        self.state = ConnectorState::Open;
        Ok(())
    }

    async fn emit(&mut self, word: &str, count: u64) -> Result<(), ConnectorError> {
        self.state.ensure(ConnectorState::Open)?;
        self.attempts.fetch_add(1, Ordering::Relaxed);
        if self.failures_remaining > 0 {
            self.failures_remaining -= 1;
            return Err(ConnectorError::transient_sink("injected transient failure"));
        }
        self.updates.lock().push((word.to_owned(), count));
        Ok(())
    }

    async fn close(&mut self) -> Result<(), ConnectorError> {
        self.state = ConnectorState::Closed;
        Ok(())
    }

    fn state(&self) -> ConnectorState {
        self.state
    }
}

/// Sink that rejects every emit.
pub struct FailingSink {
    transient: bool,
    attempts: Arc<AtomicU64>,
    state: ConnectorState,
}

impl FailingSink {
    /// Creates a sink whose failures are transient (retryable).
    #[must_use]
    pub fn transient() -> Self {
        Self {
            transient: true,
            attempts: Arc::new(AtomicU64::new(0)),
            state: ConnectorState::Created,
        }
    }

    /// Creates a sink whose failures are fatal.
    #[must_use]
    pub fn fatal() -> Self {
        Self {
            transient: false,
            attempts: Arc::new(AtomicU64::new(0)),
            state: ConnectorState::Created,
        }
    }

    /// Shared counter of emit attempts.
    #[must_use]
    pub fn attempts(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.attempts)
    }
}

#[async_trait]
impl SinkConnector for FailingSink {
    async fn open(&mut self, _config: &ConnectorConfig) -> Result<(), ConnectorError> {
        self.state.ensure(ConnectorState::Created)?;
        self.state = ConnectorState::Open;
        Ok(())
    }

    async fn emit(&mut self, _word: &str, _count: u64) -> Result<(), ConnectorError> {
        self.state.ensure(ConnectorState::Open)?;
        self.attempts.fetch_add(1, Ordering::Relaxed);
        if self.transient {
            Err(ConnectorError::transient_sink("injected transient failure"))
        } else {
            Err(ConnectorError::fatal_sink("injected fatal failure"))
        }
    }

    async fn close(&mut self) -> Result<(), ConnectorError> {
        self.state = ConnectorState::Closed;
        Ok(())
    }

    fn state(&self) -> ConnectorState {
        self.state
    }
}
