//! End-to-end pipeline tests over the happy path.
//!
//! Drives full pipelines with in-process connectors and checks the
//! count invariant, emission ordering, case normalization, and store
//! observability after shutdown.

use wordstream_connectors::testing::{CollectingSink, MockSource};
use wordstream_connectors::{channel_sink, channel_source, Record};
use wordstream_core::{AHashCountStore, SharedCountStore};
use wordstream_pipeline::{PipelineState, WordCountPipeline};

fn expected(pairs: &[(&str, u64)]) -> Vec<(String, u64)> {
    pairs.iter().map(|(w, c)| ((*w).to_string(), *c)).collect()
}

#[tokio::test]
async fn test_counts_and_order_end_to_end() {
    let source = MockSource::with_lines(&["all streams lead to kafka", "all counts"]);
    let sink = CollectingSink::new();
    let collected = sink.collected();

    let pipeline = WordCountPipeline::builder()
        .source(source)
        .sink(sink)
        .build()
        .unwrap();
    let metrics = pipeline.metrics();

    let handle = pipeline.start();
    handle.wait_until_stopped().await.unwrap();

    assert_eq!(
        collected.lock().as_slice(),
        expected(&[
            ("all", 1),
            ("streams", 1),
            ("lead", 1),
            ("to", 1),
            ("kafka", 1),
            ("all", 2),
            ("counts", 1),
        ])
    );

    let snap = metrics.snapshot();
    assert_eq!(snap.records, 2);
    assert_eq!(snap.tokens, 7);
    assert_eq!(snap.emissions, 7);
    assert_eq!(snap.malformed, 0);
}

#[tokio::test]
async fn test_single_record_emission_order() {
    let sink = CollectingSink::new();
    let collected = sink.collected();

    let pipeline = WordCountPipeline::builder()
        .source(MockSource::with_lines(&["a b a"]))
        .sink(sink)
        .build()
        .unwrap();
    pipeline.start().wait_until_stopped().await.unwrap();

    assert_eq!(
        collected.lock().as_slice(),
        expected(&[("a", 1), ("b", 1), ("a", 2)])
    );
}

#[tokio::test]
async fn test_case_normalization() {
    let sink = CollectingSink::new();
    let collected = sink.collected();

    let pipeline = WordCountPipeline::builder()
        .source(MockSource::with_lines(&["Hello HELLO"]))
        .sink(sink)
        .build()
        .unwrap();
    pipeline.start().wait_until_stopped().await.unwrap();

    assert_eq!(
        collected.lock().as_slice(),
        expected(&[("hello", 1), ("hello", 2)])
    );
}

#[tokio::test]
async fn test_channel_connectors_end_to_end() {
    let (records_tx, source) = channel_source(16);
    let (sink, mut updates_rx) = channel_sink(16);

    let pipeline = WordCountPipeline::builder()
        .source(source)
        .sink(sink)
        .build()
        .unwrap();
    let handle = pipeline.start();

    records_tx.send(Record::from("hello world")).await.unwrap();
    records_tx.send(Record::from("hello")).await.unwrap();
    drop(records_tx);

    handle.wait_until_stopped().await.unwrap();

    let mut updates = Vec::new();
    while let Some(update) = updates_rx.recv().await {
        updates.push((update.word, update.count));
    }
    assert_eq!(
        updates,
        expected(&[("hello", 1), ("world", 1), ("hello", 2)])
    );
}

#[tokio::test]
async fn test_shared_store_observable_after_stop() {
    let store = SharedCountStore::new(AHashCountStore::new());

    let pipeline = WordCountPipeline::builder()
        .source(MockSource::with_lines(&["to be or not to be"]))
        .sink(CollectingSink::new())
        .store(store.clone())
        .build()
        .unwrap();

    let handle = pipeline.start();
    let state_rx = handle.state_stream();
    handle.wait_until_stopped().await.unwrap();

    assert_eq!(*state_rx.borrow(), PipelineState::Stopped);
    assert_eq!(store.get("to"), 2);
    assert_eq!(store.get("be"), 2);
    assert_eq!(store.get("or"), 1);
    assert_eq!(store.get("not"), 1);
    assert_eq!(store.get("absent"), 0);
    assert_eq!(store.distinct_words(), 4);
}

#[tokio::test]
async fn test_empty_and_blank_records_emit_nothing() {
    let sink = CollectingSink::new();
    let collected = sink.collected();

    let pipeline = WordCountPipeline::builder()
        .source(MockSource::with_lines(&["", "   ", "word"]))
        .sink(sink)
        .build()
        .unwrap();
    let metrics = pipeline.metrics();
    pipeline.start().wait_until_stopped().await.unwrap();

    assert_eq!(collected.lock().as_slice(), expected(&[("word", 1)]));
    let snap = metrics.snapshot();
    assert_eq!(snap.records, 3);
    assert_eq!(snap.tokens, 1);
    assert_eq!(snap.malformed, 0);
}
