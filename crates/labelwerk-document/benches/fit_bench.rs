// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the auto-fit layout in the labelwerk-document crate.
// Covers the two shapes the search spends most of its time on: a short
// width-bound string and a long string that wraps onto three lines.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use labelwerk_core::LabelConfig;
use labelwerk_document::{FitOptions, LabelContent, LabelTemplate, LabelWriter, StandardFont, fit};

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Fit a short and a long string onto a 2x4 label.
fn bench_fit(c: &mut Criterion) {
    let geometry = LabelConfig::default()
        .geometry("2x4")
        .expect("default size exists");
    let options = FitOptions::default();
    let font = StandardFont::HelveticaBold;

    c.bench_function("fit short (2x4)", |b| {
        b.iter(|| fit(&geometry, black_box("HELLO WORLD"), &font, &options));
    });

    let long = "Aisle 14 shelf C spare fuses relays and terminal blocks for the packaging line";
    c.bench_function("fit long (2x4)", |b| {
        b.iter(|| fit(&geometry, black_box(long), &font, &options));
    });
}

/// Full render including PDF serialisation.
fn bench_render(c: &mut Criterion) {
    let geometry = LabelConfig::default()
        .geometry("4x6")
        .expect("default size exists");
    let writer = LabelWriter::new(geometry);
    let content = LabelContent {
        content: "FRAGILE this side up".into(),
        ..Default::default()
    };

    c.bench_function("render fit label (4x6)", |b| {
        b.iter(|| {
            let rendered = writer.render(&LabelTemplate::Fit, black_box(&content));
            black_box(rendered.map(|r| r.bytes.len()))
        });
    });
}

criterion_group!(benches, bench_fit, bench_render);
criterion_main!(benches);
