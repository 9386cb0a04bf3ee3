//! Tokenize + aggregate throughput benchmarks.
//!
//! Run with: cargo bench --bench aggregate_bench

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};

use wordstream_core::{tokenize, Aggregator};

/// A paragraph with a skewed word distribution, repeated to build the
/// benchmark corpus.
const SENTENCE: &str =
    "all streams lead to kafka and all counts lead to the store the store the store";

fn corpus(lines: usize) -> Vec<String> {
    (0..lines).map(|i| format!("{SENTENCE} line{i}")).collect()
}

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");
    group.throughput(Throughput::Bytes(SENTENCE.len() as u64));
    group.bench_function("sentence", |b| {
        b.iter(|| black_box(tokenize(black_box(SENTENCE))));
    });
    group.finish();
}

fn bench_aggregate(c: &mut Criterion) {
    let lines = corpus(1_000);
    let tokens_per_corpus: u64 = lines.iter().map(|l| tokenize(l).len() as u64).sum();

    let mut group = c.benchmark_group("aggregate");
    group.throughput(Throughput::Elements(tokens_per_corpus));
    group.bench_function("corpus_1k_lines", |b| {
        b.iter(|| {
            let mut aggregator = Aggregator::new();
            for line in &lines {
                for token in tokenize(line) {
                    black_box(aggregator.process(token));
                }
            }
            aggregator
        });
    });
    group.finish();
}

criterion_group!(benches, bench_tokenize, bench_aggregate);
criterion_main!(benches);
