//! Criterion benchmarks for Quiver.
//!
//! Covers the hot paths of a batch build and of query evaluation:
//! - Posting construction from word streams
//! - Index encoding and decoding
//! - Merge-join set operations
//! - Query evaluation against a loaded dictionary

use std::hint::black_box;
use std::sync::Arc;

use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use quiver::analysis::IdentityStemmer;
use quiver::index::codec::{decode, encode};
use quiver::index::{DocId, PostingBuilder, TermDictionary};
use quiver::query::{QueryEvaluator, difference, intersect, union};

const WORDS: &[&str] = &[
    "search", "engine", "full", "text", "index", "query", "document", "field", "term", "phrase",
    "boolean", "posting", "merge", "relevance", "analysis", "token", "stemming", "suffix",
    "corpus", "retrieval", "ranking", "filtering", "memory", "storage",
];

/// Generate word streams for benchmarking.
fn generate_test_documents(count: usize) -> Vec<String> {
    let mut documents = Vec::with_capacity(count);
    for i in 0..count {
        let doc_length = 50 + (i % 100); // Variable length documents
        let doc: Vec<&str> = (0..doc_length)
            .map(|j| WORDS[(i * 7 + j * 13) % WORDS.len()]) // Pseudo-random distribution
            .collect();
        documents.push(doc.join(" "));
    }
    documents
}

fn build_postings(documents: &[String]) -> PostingBuilder {
    let mut builder = PostingBuilder::new();
    for (id, text) in documents.iter().enumerate() {
        builder
            .add_text(id as DocId, text.as_bytes())
            .expect("generated documents are valid");
    }
    builder
}

/// Every `step`-th id below `limit`.
fn stride(step: DocId, limit: DocId) -> Vec<DocId> {
    (0..limit).step_by(step as usize).collect()
}

/// Benchmark building posting entries.
fn bench_posting_builder(c: &mut Criterion) {
    let mut group = c.benchmark_group("posting_builder");
    let documents = generate_test_documents(1000);

    group.throughput(Throughput::Elements(documents.len() as u64));
    group.bench_function("build_1000_documents", |b| {
        b.iter_batched(
            || build_postings(&documents),
            |builder| black_box(builder.build()),
            BatchSize::LargeInput,
        )
    });

    group.finish();
}

/// Benchmark the binary index format.
fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    let entries = build_postings(&generate_test_documents(1000)).build();
    let bytes = encode(&entries).expect("entries are valid");

    group.throughput(Throughput::Bytes(bytes.len() as u64));
    group.bench_function("encode", |b| b.iter(|| black_box(encode(black_box(&entries)))));
    group.bench_function("decode", |b| b.iter(|| black_box(decode(black_box(&bytes)))));

    group.finish();
}

/// Benchmark merge-join set operations.
fn bench_set_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_operations");
    let a = stride(2, 200_000);
    let b = stride(3, 200_000);

    group.throughput(Throughput::Elements((a.len() + b.len()) as u64));
    group.bench_function("intersect", |bench| {
        bench.iter(|| black_box(intersect(black_box(&a), black_box(&b))))
    });
    group.bench_function("union", |bench| {
        bench.iter(|| black_box(union(black_box(&a), black_box(&b))))
    });
    group.bench_function("difference", |bench| {
        bench.iter(|| black_box(difference(black_box(&a), black_box(&b))))
    });

    group.finish();
}

/// Benchmark end-to-end query evaluation.
fn bench_query_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_evaluation");
    let entries = build_postings(&generate_test_documents(5000)).build();
    let dictionary = Arc::new(TermDictionary::from_entries(entries).expect("entries are valid"));
    let evaluator = QueryEvaluator::with_stemmer(dictionary, Box::new(IdentityStemmer::new()));

    for query in ["search", "search & index", "search | query ! term", "missing & index"] {
        group.bench_function(query, |b| {
            b.iter(|| black_box(evaluator.evaluate_line(black_box(query))))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_posting_builder,
    bench_codec,
    bench_set_operations,
    bench_query_evaluation
);

criterion_main!(benches);
