//! Multi-team comparison helpers
//!
//! Pure functions behind the comparison view: naming teams, offering laps
//! for exclusion and extracting plot series from the filtered laps.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{LapRecord, LapTable, PitThreshold, SourceId};

/// Display names for acquired sources
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamNames {
    names: Vec<(SourceId, String)>,
}

impl TeamNames {
    /// Name sources `Team 1`, `Team 2`, ... in order, unless a non-blank override exists
    pub fn assign(sources: &[SourceId], overrides: &BTreeMap<SourceId, String>) -> Self {
        let names = sources
            .iter()
            .enumerate()
            .map(|(index, source)| {
                let name = overrides
                    .get(source)
                    .map(|name| name.trim())
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Team {}", index + 1));
                (source.clone(), name)
            })
            .collect();
        Self { names }
    }

    pub fn name(&self, source: &SourceId) -> Option<&str> {
        self.names.iter().find(|(id, _)| id == source).map(|(_, name)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SourceId, &str)> {
        self.names.iter().map(|(id, name)| (id, name.as_str()))
    }
}

/// A lap above the pit threshold offered for exclusion
#[derive(Debug, Clone, PartialEq)]
pub struct ExclusionCandidate {
    pub lap_number: u32,
    pub lap_time: f64,
    pub label: String,
}

/// Label shown for an exclusion candidate
pub fn exclusion_label(lap_number: u32, lap_time: f64) -> String {
    format!("Lap {} (Time: {:.3}s)", lap_number, lap_time)
}

/// Laps of a table above the threshold, in lap order
pub fn exclusion_candidates(table: &LapTable, threshold: PitThreshold) -> Vec<ExclusionCandidate> {
    table
        .laps()
        .iter()
        .filter(|lap| threshold.is_pit_lap(lap.lap_time))
        .map(|lap| ExclusionCandidate {
            lap_number: lap.lap_number,
            lap_time: lap.lap_time,
            label: exclusion_label(lap.lap_number, lap.lap_time),
        })
        .collect()
}

/// Variable plotted against lap number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlotMetric {
    Position,
    LapTime,
    Gap,
    Interval,
}

impl PlotMetric {
    pub const ALL: [PlotMetric; 4] =
        [PlotMetric::Position, PlotMetric::LapTime, PlotMetric::Gap, PlotMetric::Interval];

    /// Axis label
    pub fn label(self) -> &'static str {
        match self {
            PlotMetric::Position => "Position",
            PlotMetric::LapTime => "Lap Time (s)",
            PlotMetric::Gap => "Gap (s)",
            PlotMetric::Interval => "Interval (s)",
        }
    }

    pub fn value(self, lap: &LapRecord) -> Option<f64> {
        match self {
            PlotMetric::Position => lap.position.map(f64::from),
            PlotMetric::LapTime => Some(lap.lap_time),
            PlotMetric::Gap => lap.gap,
            PlotMetric::Interval => lap.interval,
        }
    }
}

/// Inclusive lap-number range shown on the x axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LapWindow {
    pub start: u32,
    pub end: u32,
}

impl LapWindow {
    /// `None` when `start > end`
    pub fn new(start: u32, end: u32) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// From lap 1 to the highest lap of any table; `None` without laps
    pub fn spanning<'a>(tables: impl IntoIterator<Item = &'a LapTable>) -> Option<Self> {
        let end = tables.into_iter().filter_map(LapTable::last_lap_number).max()?;
        Self::new(1, end.max(1))
    }

    /// Keep the start but move the end to the current lap, the highest lap of any table
    pub fn end_at_current<'a>(self, tables: impl IntoIterator<Item = &'a LapTable>) -> Option<Self> {
        let current = tables.into_iter().filter_map(LapTable::last_lap_number).max()?;
        Self::new(self.start, current)
    }

    pub fn contains(&self, lap_number: u32) -> bool {
        (self.start..=self.end).contains(&lap_number)
    }
}

/// One plotted point; `value` is `None` where the metric is missing for that lap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotPoint {
    pub lap_number: u32,
    pub value: Option<f64>,
}

/// Series for one team, taken from its filtered laps
pub fn plot_series(laps: &[LapRecord], metric: PlotMetric, window: LapWindow) -> Vec<PlotPoint> {
    laps.iter()
        .filter(|lap| window.contains(lap.lap_number))
        .map(|lap| PlotPoint { lap_number: lap.lap_number, value: metric.value(lap) })
        .collect()
}

/// Y-axis limits, applied only when both are given and `min < max`
pub fn axis_limits(min: Option<f64>, max: Option<f64>) -> Option<(f64, f64)> {
    match (min, max) {
        (Some(min), Some(max)) if min < max => Some((min, max)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::table_from_times;

    #[test]
    fn team_names_default_and_override() {
        let sources = vec![SourceId::from("a"), SourceId::from("b"), SourceId::from("c")];
        let overrides = BTreeMap::from([
            (SourceId::from("b"), "  Blue Racing ".to_string()),
            (SourceId::from("c"), "   ".to_string()),
        ]);

        let names = TeamNames::assign(&sources, &overrides);
        assert_eq!(names.name(&SourceId::from("a")), Some("Team 1"));
        assert_eq!(names.name(&SourceId::from("b")), Some("Blue Racing"));
        assert_eq!(names.name(&SourceId::from("c")), Some("Team 3"));
        assert_eq!(names.name(&SourceId::from("z")), None);
        assert_eq!(names.iter().count(), 3);
    }

    #[test]
    fn exclusion_candidates_are_laps_above_threshold() {
        let table = table_from_times(&[70.0, 95.1234, 71.0, 80.0, 120.5]);
        let candidates = exclusion_candidates(&table, PitThreshold::default());

        let laps: Vec<u32> = candidates.iter().map(|c| c.lap_number).collect();
        assert_eq!(laps, vec![2, 5]);
        assert_eq!(candidates[0].label, "Lap 2 (Time: 95.123s)");
        assert_eq!(candidates[1].label, "Lap 5 (Time: 120.500s)");
    }

    #[test]
    fn window_spans_all_tables() {
        let short = table_from_times(&[70.0, 71.0]);
        let long = table_from_times(&[70.0, 71.0, 72.0, 73.0]);

        assert_eq!(LapWindow::spanning([&short, &long]), Some(LapWindow { start: 1, end: 4 }));
        assert_eq!(LapWindow::spanning(std::iter::empty::<&LapTable>()), None);
        assert_eq!(LapWindow::new(5, 3), None);

        let narrowed = LapWindow::new(2, 3).unwrap();
        assert_eq!(narrowed.end_at_current([&short, &long]), Some(LapWindow { start: 2, end: 4 }));
        assert_eq!(LapWindow::new(9, 9).unwrap().end_at_current([&long]), None);
    }

    #[test]
    fn series_respects_window_and_metric() {
        let mut laps = table_from_times(&[70.0, 71.0, 72.0, 73.0]).laps().to_vec();
        laps[1].gap = Some(3.5);

        let window = LapWindow::new(2, 3).unwrap();
        let gaps = plot_series(&laps, PlotMetric::Gap, window);
        assert_eq!(
            gaps,
            vec![
                PlotPoint { lap_number: 2, value: Some(3.5) },
                PlotPoint { lap_number: 3, value: None },
            ]
        );

        let times = plot_series(&laps, PlotMetric::LapTime, window);
        assert_eq!(times[1].value, Some(72.0));
    }

    #[test]
    fn axis_limits_need_ordered_pair() {
        assert_eq!(axis_limits(Some(60.0), Some(90.0)), Some((60.0, 90.0)));
        assert_eq!(axis_limits(Some(90.0), Some(60.0)), None);
        assert_eq!(axis_limits(Some(60.0), None), None);
    }

    #[test]
    fn metric_labels() {
        let labels: Vec<&str> = PlotMetric::ALL.iter().map(|m| m.label()).collect();
        assert_eq!(labels, vec!["Position", "Lap Time (s)", "Gap (s)", "Interval (s)"]);
    }
}
