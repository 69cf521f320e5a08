//! Benchmarks for lap table building and stint segmentation
//!
//! Covers a full endurance race worth of laps (~700) with regular pit stops:
//! - Raw row parsing and canonical table construction
//! - Segmentation with and without exclusions
//! - Cached re-analysis through the analyser
//!
//! Platform: Cross-platform (synthetic data, CI-safe)

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::collections::BTreeSet;
use std::hint::black_box;
use stintwall::test_utils::{format_lap_time, table_from_times};
use stintwall::{LapTableBuilder, PitThreshold, RawRow, StintAnalyser, segment};

const RACE_LAPS: usize = 700;

/// Lap times with a pit lap every 35 laps and a little variation
fn race_times() -> Vec<f64> {
    (0..RACE_LAPS)
        .map(|i| if i % 35 == 34 { 152.4 } else { 113.0 + (i % 7) as f64 * 0.173 })
        .collect()
}

fn race_rows() -> Vec<RawRow> {
    race_times()
        .iter()
        .enumerate()
        .map(|(i, t)| {
            RawRow::from([
                (i + 1).to_string(),
                "4".to_string(),
                String::new(),
                format_lap_time(*t),
                "12.345".to_string(),
                "0.812".to_string(),
            ])
        })
        .collect()
}

fn bench_table_building(c: &mut Criterion) {
    let rows = race_rows();
    let builder = LapTableBuilder::new();

    let mut group = c.benchmark_group("lap_table");
    group.throughput(Throughput::Elements(rows.len() as u64));
    group.bench_function("build_from_raw_rows", |b| {
        b.iter(|| black_box(builder.build(black_box(&rows))))
    });
    group.finish();
}

fn bench_segmentation(c: &mut Criterion) {
    let table = table_from_times(&race_times());
    let threshold = PitThreshold::default();
    let none = BTreeSet::new();
    let some: BTreeSet<u32> = (1..=RACE_LAPS as u32).step_by(50).collect();

    let mut group = c.benchmark_group("segmentation");
    group.throughput(Throughput::Elements(table.len() as u64));
    group.bench_function("no_exclusions", |b| {
        b.iter(|| black_box(segment(black_box(table.laps()), threshold, &none)))
    });
    group.bench_function("with_exclusions", |b| {
        b.iter(|| black_box(segment(black_box(table.laps()), threshold, &some)))
    });
    group.finish();
}

fn bench_cached_analysis(c: &mut Criterion) {
    let table = table_from_times(&race_times());
    let threshold = PitThreshold::default();
    let excluded = BTreeSet::new();
    let mut analyser = StintAnalyser::default();
    analyser.analyse_table(&table, threshold, &excluded);

    c.bench_function("cached_analysis_hit", |b| {
        b.iter(|| black_box(analyser.analyse_table(black_box(&table), threshold, &excluded)))
    });
}

criterion_group!(benches, bench_table_building, bench_segmentation, bench_cached_analysis);
criterion_main!(benches);
