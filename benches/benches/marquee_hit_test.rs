// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for marquee hit-testing over event boxes.
//!
//! Hit-testing runs at most once per frame during a marquee drag, but over
//! the *whole* box list each time; this tracks the cost per list size for
//! marquees covering a small corner and most of the grid.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Rect;
use trellis_select::{EventBox, hit_test};

fn synthetic_boxes(count: usize) -> Vec<EventBox<u32>> {
    // A grid of 45 px rows, 25 events per row, spread over ~5000 px of track.
    (0..count)
        .map(|i| {
            let row = (i / 25) as f64;
            let col = (i % 25) as f64;
            let x0 = col * 200.0 + (i % 7) as f64 * 11.0;
            let y0 = row * 53.0 + 8.0;
            EventBox::new(i as u32, Rect::new(x0, y0, x0 + 120.0, y0 + 45.0))
        })
        .collect()
}

fn bench_hit_test(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit_test");
    for &count in &[500_usize, 2_500, 10_000] {
        let boxes = synthetic_boxes(count);
        let corner = Rect::new(0.0, 0.0, 600.0, 300.0);
        let sweep = Rect::new(0.0, 0.0, 5_000.0, 20_000.0);

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("corner", count), &boxes, |b, boxes| {
            b.iter(|| black_box(hit_test(boxes, corner)));
        });
        group.bench_with_input(BenchmarkId::new("sweep", count), &boxes, |b, boxes| {
            b.iter(|| black_box(hit_test(boxes, sweep)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_hit_test);
criterion_main!(benches);
