// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Benchmarks for engine dispatch, including metrics recording overhead.

use array_core::Array;
use array_runtime::{ArrayEngine, EngineConfig};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_square(rng: &mut StdRng, size: usize) -> Array {
    let data = (0..size * size).map(|_| rng.gen_range(-1.0..1.0)).collect();
    Array::matrix(size, size, data).unwrap()
}

fn engine(record_metrics: bool) -> ArrayEngine {
    ArrayEngine::new(EngineConfig {
        record_metrics,
        ..Default::default()
    })
    .unwrap()
}

fn bench_metrics_overhead(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let a = random_square(&mut rng, 64);
    let b = random_square(&mut rng, 64);

    let mut group = c.benchmark_group("engine_add_64");
    for record in [false, true] {
        let e = engine(record);
        let label = if record { "metrics" } else { "plain" };
        group.bench_with_input(BenchmarkId::from_parameter(label), &e, |bench, e| {
            bench.iter(|| black_box(e.add(&a, &b).unwrap()))
        });
    }
    group.finish();
}

fn bench_multiply_sizes(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(8);
    let e = engine(false);

    let mut group = c.benchmark_group("engine_multiply");
    group.sample_size(20);
    for size in [64, 128, 256] {
        let a = random_square(&mut rng, size);
        let b = random_square(&mut rng, size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bench, _| {
            bench.iter(|| black_box(e.multiply(&a, &b).unwrap()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_metrics_overhead, bench_multiply_sizes);
criterion_main!(benches);
