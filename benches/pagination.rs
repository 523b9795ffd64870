//! Benchmarks for pagination and page rendering.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(clippy::expect_used, clippy::cast_lossless)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::collections::{HashMap, HashSet};
use xlprint::layout::SheetLayout;
use xlprint::print::{paginate, Paper, PrintOptions, PrintSession};
use xlprint::render::{RecordingFactory, RecordingPainter, RecordingSurface};
use xlprint::types::CellRange;

/// Sheet with varied row heights, a merge every 50 rows and a frozen header.
fn build_sheet(rows: u32, cols: u32) -> SheetLayout {
    let row_heights: HashMap<u32, f64> = (0..rows)
        .filter(|r| r % 7 == 0)
        .map(|r| (r, 20.0 + f64::from(r % 5) * 8.0))
        .collect();
    let col_widths: HashMap<u32, f64> = (0..cols)
        .map(|c| (c, 60.0 + f64::from(c % 4) * 20.0))
        .collect();
    let merges: Vec<CellRange> = (1..rows.saturating_sub(3))
        .step_by(50)
        .map(|r| CellRange::new(r, 1, r + 2, 2))
        .collect();
    SheetLayout::new(
        rows,
        cols,
        &col_widths,
        &row_heights,
        &HashSet::new(),
        &HashSet::new(),
        &merges,
        1,
        1,
    )
}

/// Pagination of tall sheets, fit to width
fn bench_paginate_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("paginate_rows");
    let paper = Paper::default();

    for rows in [1_000u32, 10_000, 100_000] {
        let layout = build_sheet(rows, 20);
        group.throughput(Throughput::Elements(u64::from(rows)));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &layout, |b, layout| {
            b.iter(|| paginate(black_box(layout), &paper))
        });
    }

    group.finish();
}

/// Horizontal strips of a wide sheet at scale 1
fn bench_paginate_wide(c: &mut Criterion) {
    let layout = build_sheet(2_000, 500);
    let mut paper = Paper::default();
    paper.fit_to_width = false;

    c.bench_function("paginate_wide_2000x500", |b| {
        b.iter(|| paginate(black_box(&layout), &paper))
    });
}

/// Full preview onto recording surfaces
fn bench_preview(c: &mut Criterion) {
    let layout = build_sheet(5_000, 20);

    c.bench_function("preview_5000x20", |b| {
        b.iter(|| {
            let mut session: PrintSession<RecordingSurface> =
                PrintSession::new(Paper::default(), PrintOptions::default());
            session
                .preview(
                    black_box(&layout),
                    &mut RecordingFactory::default(),
                    &mut RecordingPainter,
                )
                .expect("Failed to preview")
        })
    });
}

criterion_group!(
    benches,
    bench_paginate_rows,
    bench_paginate_wide,
    bench_preview,
);

criterion_main!(benches);
