// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for interval packing and row composition.
//!
//! Event sets are deterministic synthetic schedules: bursts of overlapping
//! events spread over a few weeks, shaped like a loaded resource row rather
//! than uniform noise.

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use trellis_levels::events_by_level;
use trellis_model::{Event, Resource};
use trellis_row::RowComposer;
use trellis_timescale::{LayoutMode, TimeScale};

const HOUR: i64 = 60 * 60 * 1000;

/// Splitmix-style generator; no external RNG needed for stable inputs.
fn next_seed(seed: &mut u64) -> u64 {
    *seed = seed.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *seed;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

fn synthetic_events(count: usize, resources: usize) -> Vec<Event> {
    let mut seed = 0x7265_6c6c_6973_u64;
    (0..count)
        .map(|i| {
            let r = next_seed(&mut seed);
            // Cluster starts so a realistic share of events overlap.
            let start = ((r % 500) as i64) * HOUR / 4;
            let duration = HOUR + ((r >> 16) % 8) as i64 * HOUR;
            Event::new(
                format!("ev-{i}"),
                format!("res-{}", i % resources),
                start,
                start + duration,
            )
        })
        .collect()
}

fn bench_packing(c: &mut Criterion) {
    let mut group = c.benchmark_group("events_by_level");
    for &count in &[100_usize, 1_000, 5_000] {
        let events = synthetic_events(count, 1);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &events, |b, events| {
            b.iter_batched(
                || events.clone(),
                |events| black_box(events_by_level(events).unwrap()),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_row_composition(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose_all");
    for &count in &[1_000_usize, 5_000] {
        let resources: Vec<Resource> = (0..50).map(|i| Resource::new(format!("res-{i}"))).collect();
        let events = synthetic_events(count, resources.len());
        let composer = RowComposer::new(TimeScale::new(0, 60_000.0, HOUR), LayoutMode::Grid);

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &events, |b, events| {
            b.iter(|| {
                black_box(
                    composer
                        .compose_all(&resources, events, &[], &[], None)
                        .unwrap(),
                );
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_packing, bench_row_composition);
criterion_main!(benches);
