// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Criterion microbenchmarks for the built-in codecs.
//!
//! Complements the minimum-of-trials runner with criterion's statistical
//! view of the same serialize and deserialize calls.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::time::Duration;
use tpc_core::codecs::default_codecs;
use tpc_core::Media;

/// Benchmark serialize for every built-in codec.
fn bench_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize");
    group.measurement_time(Duration::from_secs(3));

    let media = Media::fixture();
    for codec in default_codecs() {
        let size = codec.serialize(&media).map(|b| b.len()).unwrap_or(0);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::from_parameter(codec.name()), &media, |b, media| {
            b.iter(|| black_box(codec.serialize(black_box(media)).ok()));
        });
    }

    group.finish();
}

/// Benchmark deserialize for every built-in codec over one shared buffer.
fn bench_deserialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("deserialize");
    group.measurement_time(Duration::from_secs(3));

    let media = Media::fixture();
    for codec in default_codecs() {
        let buffer = codec
            .serialize(&media)
            .expect("Failed to produce buffer for deserialize bench");
        group.throughput(Throughput::Bytes(buffer.len() as u64));

        group.bench_with_input(BenchmarkId::from_parameter(codec.name()), &buffer, |b, buffer| {
            b.iter(|| black_box(codec.deserialize(black_box(buffer)).ok()));
        });
    }

    group.finish();
}

/// Benchmark fixture construction.
fn bench_create(c: &mut Criterion) {
    c.bench_function("create_fixture", |b| b.iter(|| black_box(Media::fixture())));
}

criterion_group!(benches, bench_create, bench_serialize, bench_deserialize);
criterion_main!(benches);
