//! Pipeline configuration.

use serde::{Deserialize, Serialize};

use wordstream_connectors::ErrorStrategy;

/// Configuration for one word-count pipeline.
///
/// Connector locations (the input source address, the output sink
/// address) travel in each connector's
/// [`ConnectorConfig`](wordstream_connectors::ConnectorConfig); this
/// struct carries the pipeline-level knobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Stable pipeline identity.
    ///
    /// Appears in every log line and is handed to collaborators that
    /// key checkpoint/restart state by pipeline (the pipeline itself is
    /// stateless across restarts; its count store is volatile).
    pub app_id: String,

    /// What to do with records that fail to decode. Default: skip and
    /// count, keeping the pipeline live despite bad data.
    pub error_strategy: ErrorStrategy,

    /// Retries for a transient sink write failure before it is treated
    /// as fatal. Default: 1.
    pub sink_retries: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            app_id: "wordstream-wordcount".to_string(),
            error_strategy: ErrorStrategy::default(),
            sink_retries: 1,
        }
    }
}
