//! Fluent builder for pipeline construction.

use std::sync::Arc;

use wordstream_connectors::{ConnectorConfig, ErrorRouter, SinkConnector, SourceConnector};
use wordstream_core::{Aggregator, CountStore};

use crate::config::PipelineConfig;
use crate::driver::WordCountPipeline;
use crate::error::PipelineError;
use crate::metrics::PipelineMetrics;

/// Fluent builder for a [`WordCountPipeline`].
///
/// # Example
///
/// ```rust,ignore
/// let pipeline = WordCountPipeline::builder()
///     .source(source)
///     .sink(sink)
///     .config(PipelineConfig {
///         app_id: "counts-prod".into(),
///         ..PipelineConfig::default()
///     })
///     .build()?;
/// ```
#[derive(Default)]
pub struct PipelineBuilder {
    source: Option<Box<dyn SourceConnector>>,
    sink: Option<Box<dyn SinkConnector>>,
    source_config: ConnectorConfig,
    sink_config: ConnectorConfig,
    store: Option<Box<dyn CountStore>>,
    config: PipelineConfig,
}

impl PipelineBuilder {
    /// Creates a builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the input source.
    #[must_use]
    pub fn source(mut self, source: impl SourceConnector + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Sets the config passed to the source's `open()`.
    #[must_use]
    pub fn source_config(mut self, config: ConnectorConfig) -> Self {
        self.source_config = config;
        self
    }

    /// Sets the output sink.
    #[must_use]
    pub fn sink(mut self, sink: impl SinkConnector + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Sets the config passed to the sink's `open()`.
    #[must_use]
    pub fn sink_config(mut self, config: ConnectorConfig) -> Self {
        self.sink_config = config;
        self
    }

    /// Sets the count store the aggregator runs over.
    ///
    /// Defaults to a fresh
    /// [`AHashCountStore`](wordstream_core::AHashCountStore). Pass a
    /// [`SharedCountStore`](wordstream_core::SharedCountStore) clone to
    /// keep inspection access after the pipeline stops.
    #[must_use]
    pub fn store(mut self, store: impl CountStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Sets the pipeline configuration.
    #[must_use]
    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] if no source or no sink was
    /// provided.
    pub fn build(self) -> Result<WordCountPipeline, PipelineError> {
        let source = self
            .source
            .ok_or_else(|| PipelineError::Config("pipeline requires a source".into()))?;
        let sink = self
            .sink
            .ok_or_else(|| PipelineError::Config("pipeline requires a sink".into()))?;

        let aggregator = match self.store {
            Some(store) => Aggregator::with_store(store),
            None => Aggregator::new(),
        };

        let metrics = Arc::new(PipelineMetrics::new());
        let router = ErrorRouter::new(
            self.config.app_id.clone(),
            self.config.error_strategy,
            Arc::clone(metrics.decode_metrics()),
        );

        Ok(WordCountPipeline {
            source,
            sink,
            source_config: self.source_config,
            sink_config: self.sink_config,
            aggregator,
            config: self.config,
            metrics,
            router,
        })
    }
}
