//! Failure handling and shutdown semantics.
//!
//! Validates the driver's error taxonomy end to end:
//! - malformed records are skipped (counted, store untouched) or halt
//!   the pipeline, per the configured strategy
//! - transient sink failures get exactly the configured retries
//! - fatal source and sink failures stop the driver and surface
//! - a stop signal drains the in-flight record before stopping

use std::sync::atomic::Ordering;

use bytes::Bytes;

use wordstream_connectors::testing::{CollectingSink, FailingSink, FlakySink, MockSource};
use wordstream_connectors::{channel_sink, ConnectorError, ErrorStrategy, Record};
use wordstream_core::{AHashCountStore, SharedCountStore};
use wordstream_pipeline::{
    PipelineConfig, PipelineError, PipelineState, WordCountPipeline,
};

fn expected(pairs: &[(&str, u64)]) -> Vec<(String, u64)> {
    pairs.iter().map(|(w, c)| ((*w).to_string(), *c)).collect()
}

fn invalid_utf8_record() -> Record {
    Record::new(Bytes::from_static(&[0xff, 0xfe, 0xfd]))
}

#[tokio::test]
async fn test_malformed_record_is_skipped_and_counted() {
    let store = SharedCountStore::new(AHashCountStore::new());
    let sink = CollectingSink::new();
    let collected = sink.collected();

    let pipeline = WordCountPipeline::builder()
        .source(MockSource::with_records(vec![
            Record::from("hello world"),
            invalid_utf8_record(),
            Record::from("hello"),
        ]))
        .sink(sink)
        .store(store.clone())
        .build()
        .unwrap();
    let metrics = pipeline.metrics();

    // The driver keeps running past the bad record: the following
    // record is processed and the run ends cleanly.
    pipeline.start().wait_until_stopped().await.unwrap();

    assert_eq!(
        collected.lock().as_slice(),
        expected(&[("hello", 1), ("world", 1), ("hello", 2)])
    );
    assert_eq!(store.distinct_words(), 2);

    let snap = metrics.snapshot();
    assert_eq!(snap.records, 3);
    assert_eq!(snap.malformed, 1);
    assert_eq!(snap.skipped, 1);
    assert_eq!(snap.emissions, 3);
}

#[tokio::test]
async fn test_malformed_record_halts_under_fail_strategy() {
    let sink = CollectingSink::new();
    let collected = sink.collected();

    let pipeline = WordCountPipeline::builder()
        .source(MockSource::with_records(vec![
            invalid_utf8_record(),
            Record::from("never processed"),
        ]))
        .sink(sink)
        .config(PipelineConfig {
            error_strategy: ErrorStrategy::Fail,
            ..PipelineConfig::default()
        })
        .build()
        .unwrap();

    let err = pipeline.start().wait_until_stopped().await.unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Source(ConnectorError::MalformedRecord(_))
    ));
    assert!(collected.lock().is_empty());
}

#[tokio::test]
async fn test_transient_sink_failure_is_retried_once() {
    let sink = FlakySink::new(1);
    let attempts = sink.attempts();
    let collected = sink.collected();

    let pipeline = WordCountPipeline::builder()
        .source(MockSource::with_lines(&["a"]))
        .sink(sink)
        .build()
        .unwrap();
    let metrics = pipeline.metrics();

    pipeline.start().wait_until_stopped().await.unwrap();

    assert_eq!(attempts.load(Ordering::Relaxed), 2);
    assert_eq!(collected.lock().as_slice(), expected(&[("a", 1)]));

    let snap = metrics.snapshot();
    assert_eq!(snap.sink_retries, 1);
    assert_eq!(snap.emissions, 1);
}

#[tokio::test]
async fn test_sink_failure_past_retry_budget_is_fatal() {
    let sink = FailingSink::transient();
    let attempts = sink.attempts();

    let pipeline = WordCountPipeline::builder()
        .source(MockSource::with_lines(&["a"]))
        .sink(sink)
        .build()
        .unwrap();

    let err = pipeline.start().wait_until_stopped().await.unwrap_err();
    assert!(matches!(err, PipelineError::Sink(_)));
    // One attempt plus the single configured retry.
    assert_eq!(attempts.load(Ordering::Relaxed), 2);
}

#[tokio::test]
async fn test_fatal_sink_failure_is_not_retried() {
    let sink = FailingSink::fatal();
    let attempts = sink.attempts();

    let pipeline = WordCountPipeline::builder()
        .source(MockSource::with_lines(&["a"]))
        .sink(sink)
        .build()
        .unwrap();

    let err = pipeline.start().wait_until_stopped().await.unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Sink(ConnectorError::SinkWrite {
            transient: false,
            ..
        })
    ));
    assert_eq!(attempts.load(Ordering::Relaxed), 1);
}

#[tokio::test]
async fn test_fatal_source_error_surfaces() {
    let source = MockSource::with_lines(&["ok"]).then_fail("broker gone");
    let sink = CollectingSink::new();
    let collected = sink.collected();

    let pipeline = WordCountPipeline::builder()
        .source(source)
        .sink(sink)
        .build()
        .unwrap();

    let handle = pipeline.start();
    let state_rx = handle.state_stream();
    let err = handle.wait_until_stopped().await.unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Source(ConnectorError::SourceRead(_))
    ));
    assert_eq!(*state_rx.borrow(), PipelineState::Stopped);
    // The record before the failure was fully processed.
    assert_eq!(collected.lock().as_slice(), expected(&[("ok", 1)]));
}

#[tokio::test]
async fn test_stop_during_record_drains_it_completely() {
    let source = MockSource::with_lines(&["a b a", "never pulled"]);
    let next_calls = source.next_calls();

    // Capacity 1: with nobody consuming, the driver is parked inside
    // the record, between emissions, when the stop signal arrives.
    let (sink, mut updates_rx) = channel_sink(1);

    let pipeline = WordCountPipeline::builder()
        .source(source)
        .sink(sink)
        .build()
        .unwrap();
    let handle = pipeline.start();

    // First update confirms the record is in flight.
    let first = updates_rx.recv().await.unwrap();
    assert_eq!((first.word.as_str(), first.count), ("a", 1));

    handle.stop();

    // The in-flight record still drains in full ...
    let mut rest = Vec::new();
    while let Some(update) = updates_rx.recv().await {
        rest.push((update.word, update.count));
    }
    assert_eq!(rest, expected(&[("b", 1), ("a", 2)]));

    handle.wait_until_stopped().await.unwrap();

    // ... and the second record was never pulled.
    assert_eq!(next_calls.load(Ordering::Relaxed), 1);
}

#[tokio::test]
async fn test_stop_while_idle_at_record_boundary() {
    let (records_tx, source) = wordstream_connectors::channel_source(4);
    let sink = CollectingSink::new();
    let collected = sink.collected();

    let pipeline = WordCountPipeline::builder()
        .source(source)
        .sink(sink)
        .build()
        .unwrap();
    let handle = pipeline.start();

    handle.stop();
    handle.wait_until_stopped().await.unwrap();

    assert!(collected.lock().is_empty());
    drop(records_tx);
}
