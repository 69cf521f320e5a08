//! Aggregate figures for a group of stint laps

use crate::types::LapRecord;

/// Summary of a non-empty lap group
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StintSummary {
    pub length: usize,
    /// Sum of lap times in minutes, 2 decimals
    pub total_minutes: f64,
    /// 3 decimals
    pub best_lap_seconds: f64,
    /// 3 decimals
    pub median_lap_seconds: f64,
}

/// Summarize a lap group. `None` for an empty group.
pub fn summarize(laps: &[LapRecord]) -> Option<StintSummary> {
    if laps.is_empty() {
        return None;
    }

    let mut times: Vec<f64> = laps.iter().map(|lap| lap.lap_time).collect();
    times.sort_by(f64::total_cmp);

    let total_seconds: f64 = times.iter().sum();

    Some(StintSummary {
        length: laps.len(),
        total_minutes: round_to(total_seconds / 60.0, 2),
        best_lap_seconds: round_to(times[0], 3),
        median_lap_seconds: round_to(median_of_sorted(&times), 3),
    })
}

/// Round to a number of decimals, scaling first and sending ties to even
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

// Even counts average the two middle values.
fn median_of_sorted(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 { (sorted[mid - 1] + sorted[mid]) / 2.0 } else { sorted[mid] }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laps(times: &[f64]) -> Vec<LapRecord> {
        times.iter().enumerate().map(|(i, t)| LapRecord::new(i as u32 + 1, *t)).collect()
    }

    #[test]
    fn empty_group_has_no_summary() {
        assert_eq!(summarize(&[]), None);
    }

    #[test]
    fn rounds_each_figure_to_its_precision() {
        let summary = summarize(&laps(&[61.1111, 62.2222, 63.3333])).unwrap();

        assert_eq!(summary.length, 3);
        assert_eq!(summary.total_minutes, round_to((61.1111 + 62.2222 + 63.3333) / 60.0, 2));
        assert_eq!(summary.total_minutes, 3.11);
        assert_eq!(summary.best_lap_seconds, 61.111);
        assert_eq!(summary.median_lap_seconds, 62.222);
    }

    #[test]
    fn median_of_even_count_averages_middle_pair() {
        let summary = summarize(&laps(&[72.0, 70.0, 71.0, 90.0])).unwrap();
        assert_eq!(summary.median_lap_seconds, 71.5);
        assert_eq!(summary.best_lap_seconds, 70.0);
    }

    #[test]
    fn ties_round_to_even() {
        let summary = summarize(&laps(&[60.002, 60.003])).unwrap();
        assert_eq!(summary.median_lap_seconds, 60.002);

        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.375, 2), 0.38);
        assert_eq!(round_to(-2.5, 0), -2.0);
    }

    #[test]
    fn single_lap_group() {
        let summary = summarize(&laps(&[71.0])).unwrap();
        assert_eq!(summary.length, 1);
        assert_eq!(summary.best_lap_seconds, 71.0);
        assert_eq!(summary.median_lap_seconds, 71.0);
        assert_eq!(summary.total_minutes, 1.18);
    }
}
