//! # `WordStream` Pipeline
//!
//! The pipeline driver: pulls records from a source connector, runs
//! them through the tokenizer and aggregator, and forwards each
//! emission to a sink connector in order.
//!
//! One driver runs one logical consumer loop over one count store.
//! That single-writer discipline is what makes every emission carry the
//! count produced by its own increment rather than a later value from
//! a racing writer. Scaling out means partitioning words across
//! drivers, each with its own store — not sharing this one.
//!
//! # Example
//!
//! ```no_run
//! use wordstream_connectors::testing::{CollectingSink, MockSource};
//! use wordstream_pipeline::WordCountPipeline;
//!
//! # async fn example() -> Result<(), wordstream_pipeline::PipelineError> {
//! let pipeline = WordCountPipeline::builder()
//!     .source(MockSource::with_lines(&["all streams lead to kafka"]))
//!     .sink(CollectingSink::new())
//!     .build()?;
//!
//! let handle = pipeline.start();
//! handle.stop();
//! handle.wait_until_stopped().await?;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod builder;
pub mod config;
pub mod driver;
pub mod error;
pub mod metrics;

pub use builder::PipelineBuilder;
pub use config::PipelineConfig;
pub use driver::{PipelineHandle, PipelineState, StopHandle, WordCountPipeline};
pub use error::PipelineError;
pub use metrics::{MetricsSnapshot, PipelineMetrics};
