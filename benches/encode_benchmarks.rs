//! Criterion benchmarks for name encoding.
//!
//! Measures:
//! - Rule table loading per name style
//! - Single-name encoding per style and match mode
//! - Guessing alone against the full pipeline
//! - Multi-word names with and without concatenation

use bmpm::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

// ============================================================================
// Benchmark Fixtures
// ============================================================================

const NAMES: [&str; 8] = [
    "Smith",
    "Kowalski",
    "Müller",
    "Garcia",
    "Cohen",
    "Washington",
    "Schwarzenegger",
    "Rosenzweig",
];

const STYLES: [NameStyle; 3] = [NameStyle::Generic, NameStyle::Ashkenazi, NameStyle::Sephardic];

fn encoder(style: NameStyle, mode: MatchMode) -> BeiderMorse {
    BeiderMorse::builder()
        .name_style(style)
        .match_mode(mode)
        .build()
        .unwrap()
}

// ============================================================================
// Rule Loading
// ============================================================================

fn bench_rule_loading(c: &mut Criterion) {
    let mut group = c.benchmark_group("rule_loading");
    for style in STYLES {
        group.bench_with_input(BenchmarkId::from_parameter(style), &style, |b, &style| {
            b.iter(|| RuleSet::bundled(black_box(style)).unwrap());
        });
    }
    group.finish();
}

// ============================================================================
// Encoding
// ============================================================================

fn bench_encode_names(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    group.throughput(Throughput::Elements(NAMES.len() as u64));

    for style in STYLES {
        for mode in [MatchMode::Approx, MatchMode::Exact] {
            let encoder = encoder(style, mode);
            let id = BenchmarkId::new(style.name(), mode.name());
            group.bench_function(id, |b| {
                b.iter(|| {
                    for name in NAMES {
                        black_box(encoder.encode(black_box(name)).unwrap());
                    }
                });
            });
        }
    }
    group.finish();
}

fn bench_guess_vs_encode(c: &mut Criterion) {
    let encoder = encoder(NameStyle::Generic, MatchMode::Approx);
    let mut group = c.benchmark_group("guess_vs_encode");

    for name in ["Smith", "Schwarzenegger"] {
        group.bench_with_input(BenchmarkId::new("guess", name), name, |b, name| {
            b.iter(|| encoder.guess_languages(black_box(name)));
        });
        group.bench_with_input(BenchmarkId::new("encode", name), name, |b, name| {
            b.iter(|| encoder.encode(black_box(name)).unwrap());
        });
    }
    group.finish();
}

fn bench_multiword(c: &mut Criterion) {
    let separate = encoder(NameStyle::Generic, MatchMode::Approx);
    let joined = BeiderMorse::builder().concat(true).build().unwrap();
    let mut group = c.benchmark_group("multiword");

    for name in ["van Helsing", "Maria Garcia Lopez"] {
        group.bench_with_input(BenchmarkId::new("separate", name), name, |b, name| {
            b.iter(|| separate.encode(black_box(name)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("concat", name), name, |b, name| {
            b.iter(|| joined.encode(black_box(name)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_rule_loading,
    bench_encode_names,
    bench_guess_vs_encode,
    bench_multiword
);
criterion_main!(benches);
