//! WordStream demo: count words from stdin, print updates to stdout.
//!
//! Reads one record per line, runs the word-count pipeline, and prints
//! each `(word, count)` update as `word<TAB>count`. Stops on EOF or
//! Ctrl-C; Ctrl-C drains the in-flight record before exiting.
//!
//! # Running
//!
//! ```bash
//! echo "all streams lead to kafka" | cargo run -p wordstream-demo
//! RUST_LOG=wordstream_pipeline=debug cargo run -p wordstream-demo
//! ```

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};

use wordstream_connectors::{
    channel_source, ConnectorConfig, ConnectorError, ConnectorState, Record, SinkConnector,
};
use wordstream_pipeline::{PipelineConfig, WordCountPipeline};

/// Sink that prints each update as `word<TAB>count`.
struct StdoutSink {
    state: ConnectorState,
}

impl StdoutSink {
    fn new() -> Self {
        Self {
            state: ConnectorState::Created,
        }
    }
}

#[async_trait]
impl SinkConnector for StdoutSink {
    async fn open(&mut self, _config: &ConnectorConfig) -> Result<(), ConnectorError> {
        self.state.ensure(ConnectorState::Created)?;
        self.state = ConnectorState::Open;
        Ok(())
    }

    async fn emit(&mut self, word: &str, count: u64) -> Result<(), ConnectorError> {
        self.state.ensure(ConnectorState::Open)?;
        println!("{word}\t{count}");
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

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let (records_tx, source) = channel_source(64);

    let pipeline = WordCountPipeline::builder()
        .source(source)
        .sink(StdoutSink::new())
        .config(PipelineConfig {
            app_id: "wordstream-demo".to_string(),
            ..PipelineConfig::default()
        })
        .build()?;
    let metrics = pipeline.metrics();
    let handle = pipeline.start();

    // Feed stdin lines into the pipeline; dropping the sender on EOF
    // signals end-of-stream.
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if records_tx.send(Record::new(line.into_bytes())).await.is_err() {
                break;
            }
        }
    });

    // The host owns signal wiring: Ctrl-C requests a cooperative stop.
    let stopper = handle.stop_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Ctrl-C received, stopping");
            stopper.stop();
        }
    });

    handle.wait_until_stopped().await?;

    let snap = metrics.snapshot();
    tracing::info!(
        records = snap.records,
        tokens = snap.tokens,
        emissions = snap.emissions,
        malformed = snap.malformed,
        "Pipeline finished"
    );
    Ok(())
}
