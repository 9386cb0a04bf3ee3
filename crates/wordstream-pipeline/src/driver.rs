//! The pipeline driver: lifecycle, consumer loop, and handle.
//!
//! The driver runs as a single tokio task owning the source, the sink,
//! and the aggregator. Its lifecycle is
//! `Idle → Running → Draining → Stopped`, published through a `watch`
//! channel:
//!
//! - **Idle**: built, not started; no external resources held.
//! - **Running**: pulling records, tokenizing, aggregating, forwarding
//!   emissions in order. The pull is the only suspending operation.
//! - **Draining**: a stop signal was observed. The signal is checked
//!   only between records, so the in-flight record always completes —
//!   every one of its tokens is aggregated and emitted — before the
//!   driver stops pulling.
//! - **Stopped**: terminal. Source and sink are closed on every exit
//!   path, including failures.
//!
//! Fatal conditions (source read failure, sink failure past the retry
//! budget, malformed record under the `Fail` strategy) take
//! `Running → Stopped` directly and surface through
//! [`PipelineHandle::wait_until_stopped`].

use std::sync::Arc;

use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;

use wordstream_connectors::{
    ConnectorConfig, ErrorRouter, Record, SinkConnector, SourceConnector,
};
use wordstream_core::{tokenize, Aggregator, Emission};

use crate::builder::PipelineBuilder;
use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::metrics::PipelineMetrics;

/// Pipeline lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Built, not started.
    Idle,
    /// Consuming records.
    Running,
    /// Stop observed; finishing the in-flight record.
    Draining,
    /// Terminal; resources released.
    Stopped,
}

impl std::fmt::Display for PipelineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Running => write!(f, "running"),
            Self::Draining => write!(f, "draining"),
            Self::Stopped => write!(f, "stopped"),
        }
    }
}

/// A word-count pipeline, built via [`WordCountPipeline::builder`] and
/// run with [`start`](WordCountPipeline::start).
pub struct WordCountPipeline {
    pub(crate) source: Box<dyn SourceConnector>,
    pub(crate) sink: Box<dyn SinkConnector>,
    pub(crate) source_config: ConnectorConfig,
    pub(crate) sink_config: ConnectorConfig,
    pub(crate) aggregator: Aggregator,
    pub(crate) config: PipelineConfig,
    pub(crate) metrics: Arc<PipelineMetrics>,
    pub(crate) router: ErrorRouter,
}

impl std::fmt::Debug for WordCountPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordCountPipeline")
            .field("source_config", &self.source_config)
            .field("sink_config", &self.sink_config)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl WordCountPipeline {
    /// Starts building a pipeline.
    #[must_use]
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// The pipeline's metrics handle.
    #[must_use]
    pub fn metrics(&self) -> Arc<PipelineMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Spawns the consumer loop and returns its handle.
    ///
    /// The loop stops on end-of-stream, on [`PipelineHandle::stop`], or
    /// on a fatal error; the handle's
    /// [`wait_until_stopped`](PipelineHandle::wait_until_stopped)
    /// reports which.
    #[must_use]
    pub fn start(self) -> PipelineHandle {
        let shutdown = Arc::new(Notify::new());
        let (state_tx, state_rx) = watch::channel(PipelineState::Idle);
        let metrics = Arc::clone(&self.metrics);

        let task_shutdown = Arc::clone(&shutdown);
        let join = tokio::spawn(self.run(task_shutdown, state_tx));

        PipelineHandle {
            shutdown,
            state_rx,
            metrics,
            join,
        }
    }

    async fn run(
        mut self,
        shutdown: Arc<Notify>,
        state_tx: watch::Sender<PipelineState>,
    ) -> Result<(), PipelineError> {
        tracing::info!(app_id = %self.config.app_id, "Pipeline starting");

        if let Err(e) = self.source.open(&self.source_config).await {
            let _ = state_tx.send(PipelineState::Stopped);
            return Err(PipelineError::Connector(e));
        }
        if let Err(e) = self.sink.open(&self.sink_config).await {
            if let Err(close_err) = self.source.close().await {
                tracing::warn!(error = %close_err, "Source close failed");
            }
            let _ = state_tx.send(PipelineState::Stopped);
            return Err(PipelineError::Connector(e));
        }

        let _ = state_tx.send(PipelineState::Running);
        let result = self.consume(&shutdown, &state_tx).await;

        // Scoped release: both connectors close on every exit path.
        if let Err(e) = self.source.close().await {
            tracing::warn!(error = %e, "Source close failed");
        }
        if let Err(e) = self.sink.close().await {
            tracing::warn!(error = %e, "Sink close failed");
        }
        let _ = state_tx.send(PipelineState::Stopped);

        match &result {
            Ok(()) => tracing::info!(app_id = %self.config.app_id, "Pipeline stopped"),
            Err(e) => {
                tracing::error!(app_id = %self.config.app_id, error = %e, "Pipeline stopped on failure");
            }
        }
        result
    }

    /// The consumer loop. The stop signal is polled first (`biased`)
    /// so it wins at the record boundary; record processing itself is
    /// never interrupted.
    async fn consume(
        &mut self,
        shutdown: &Notify,
        state_tx: &watch::Sender<PipelineState>,
    ) -> Result<(), PipelineError> {
        loop {
            tokio::select! {
                biased;

                () = shutdown.notified() => {
                    let _ = state_tx.send(PipelineState::Draining);
                    tracing::info!(app_id = %self.config.app_id, "Stop signal observed, draining");
                    return Ok(());
                }

                next = self.source.next() => match next {
                    Ok(Some(record)) => self.process_record(record).await?,
                    Ok(None) => {
                        tracing::info!(app_id = %self.config.app_id, "Source exhausted");
                        return Ok(());
                    }
                    Err(e) => return Err(PipelineError::Source(e)),
                },
            }
        }
    }

    /// Processes one record to completion: decode, tokenize, aggregate,
    /// forward each emission in token order.
    async fn process_record(&mut self, record: Record) -> Result<(), PipelineError> {
        self.metrics.record_pulled();

        let text = match record.text() {
            Ok(text) => text,
            // Zero tokens, store untouched; skip or halt per strategy.
            Err(e) => return self.router.handle(e).map_err(PipelineError::Source),
        };

        for token in tokenize(text) {
            self.metrics.record_token();
            let emission = self.aggregator.process(token);
            self.forward(&emission).await?;
        }
        Ok(())
    }

    /// Forwards one emission, retrying transient sink failures up to
    /// the configured budget.
    async fn forward(&mut self, emission: &Emission) -> Result<(), PipelineError> {
        let mut attempt: u32 = 0;
        loop {
            match self.sink.emit(&emission.word, emission.count).await {
                Ok(()) => {
                    self.metrics.record_emission();
                    return Ok(());
                }
                Err(e) if e.is_transient() && attempt < self.config.sink_retries => {
                    attempt += 1;
                    self.metrics.record_sink_retry();
                    tracing::warn!(
                        word = %emission.word,
                        attempt,
                        error = %e,
                        "Transient sink failure, retrying"
                    );
                }
                Err(e) => return Err(PipelineError::Sink(e)),
            }
        }
    }
}

/// Cloneable stop signal for a running pipeline.
///
/// Lets the hosting process wire OS-level termination (Ctrl-C, SIGTERM)
/// to [`stop`](Self::stop) from a task that doesn't own the
/// [`PipelineHandle`].
#[derive(Clone)]
pub struct StopHandle {
    shutdown: Arc<Notify>,
}

impl StopHandle {
    /// Requests a cooperative stop. Idempotent.
    pub fn stop(&self) {
        self.shutdown.notify_one();
    }
}

/// Handle to a running pipeline.
pub struct PipelineHandle {
    shutdown: Arc<Notify>,
    state_rx: watch::Receiver<PipelineState>,
    metrics: Arc<PipelineMetrics>,
    join: JoinHandle<Result<(), PipelineError>>,
}

impl PipelineHandle {
    /// Requests a cooperative stop.
    ///
    /// Observed between records only: the in-flight record finishes
    /// (all of its emissions are forwarded) before the driver stops
    /// pulling input. Idempotent.
    pub fn stop(&self) {
        self.shutdown.notify_one();
    }

    /// A cloneable [`StopHandle`] for external shutdown wiring.
    #[must_use]
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            shutdown: Arc::clone(&self.shutdown),
        }
    }

    /// Current pipeline state.
    #[must_use]
    pub fn state(&self) -> PipelineState {
        *self.state_rx.borrow()
    }

    /// A `watch` receiver for observing state transitions.
    #[must_use]
    pub fn state_stream(&self) -> watch::Receiver<PipelineState> {
        self.state_rx.clone()
    }

    /// The pipeline's metrics handle.
    #[must_use]
    pub fn metrics(&self) -> Arc<PipelineMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Awaits termination and reports the outcome.
    ///
    /// # Errors
    ///
    /// Returns the fatal [`PipelineError`] that stopped the driver, or
    /// [`PipelineError::Runtime`] if the driver task itself failed.
    pub async fn wait_until_stopped(self) -> Result<(), PipelineError> {
        match self.join.await {
            Ok(result) => result,
            Err(e) => Err(PipelineError::Runtime(format!("driver task failed: {e}"))),
        }
    }
}
