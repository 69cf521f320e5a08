//! Test utilities for building lap data and locating fixtures
//!
//! Shared by unit tests, the integration tests and the benchmarks.

#![cfg(any(test, feature = "benchmark"))]

use std::path::PathBuf;

use crate::laps::LapTableBuilder;
use crate::types::{LapRecord, LapTable, RawRow};

/// Laps numbered from 1 with the given times
pub fn laps_from_times(times: &[f64]) -> Vec<LapRecord> {
    times.iter().enumerate().map(|(i, time)| LapRecord::new(i as u32 + 1, *time)).collect()
}

/// Raw rows numbered from 1, with lap times written as plain seconds
pub fn rows_from_times(times: &[f64]) -> Vec<RawRow> {
    times
        .iter()
        .enumerate()
        .map(|(i, time)| {
            RawRow::from([
                (i + 1).to_string(),
                "1".to_string(),
                String::new(),
                time.to_string(),
                String::new(),
                String::new(),
            ])
        })
        .collect()
}

/// Canonical table built from raw rows of the given times
pub fn table_from_times(times: &[f64]) -> LapTable {
    LapTableBuilder::new().build(&rows_from_times(times))
}

/// Format seconds the way live-timing pages display lap times
pub fn format_lap_time(seconds: f64) -> String {
    let minutes = (seconds / 60.0).floor();
    format!("{}:{:06.3}", minutes as u64, seconds - minutes * 60.0)
}

/// Directory holding recorded scrape fixtures
pub fn recordings_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test-data").join("recorded")
}

/// Path to one recorded scrape fixture
pub fn recording_path(name: &str) -> PathBuf {
    recordings_dir().join(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_rows_keep_exact_times() {
        let table = table_from_times(&[70.0, 95.125, 61.1111]);
        let times: Vec<f64> = table.laps().iter().map(|l| l.lap_time).collect();
        assert_eq!(times, vec![70.0, 95.125, 61.1111]);
    }

    #[test]
    fn lap_times_format_as_minutes_and_seconds() {
        assert_eq!(format_lap_time(95.125), "1:35.125");
        assert_eq!(format_lap_time(59.5), "0:59.500");
        let parsed = crate::laps::parse_time(&format_lap_time(125.25)).unwrap();
        assert!((parsed - 125.25).abs() < 1e-9);
    }

    #[test]
    fn fixtures_directory_exists() {
        assert!(recordings_dir().is_dir(), "missing {}", recordings_dir().display());
    }
}
