//! Display tables with the column identifiers expected by the front end

use serde::{Deserialize, Serialize};

use crate::types::{LapRecord, StintRecord};
use crate::{Result, TimingError};

/// One row of the lap table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LapTableRow {
    #[serde(rename = "Lap Number")]
    pub lap_number: u32,
    #[serde(rename = "Pos")]
    pub position: Option<u32>,
    #[serde(rename = "Pos Change")]
    pub position_change: Option<String>,
    #[serde(rename = "Lap Time")]
    pub lap_time: f64,
    #[serde(rename = "Gap")]
    pub gap: Option<f64>,
    #[serde(rename = "Interval")]
    pub interval: Option<f64>,
    /// Same value as `Lap Time` after normalization
    #[serde(rename = "Lap Time (s)")]
    pub lap_time_seconds: f64,
}

impl From<&LapRecord> for LapTableRow {
    fn from(lap: &LapRecord) -> Self {
        Self {
            lap_number: lap.lap_number,
            position: lap.position,
            position_change: lap.position_change.clone(),
            lap_time: lap.lap_time,
            gap: lap.gap,
            interval: lap.interval,
            lap_time_seconds: lap.lap_time,
        }
    }
}

/// One row of the stint table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StintTableRow {
    #[serde(rename = "Stint Number")]
    pub stint_number: u32,
    #[serde(rename = "Start Lap")]
    pub start_lap: u32,
    #[serde(rename = "End Lap")]
    pub end_lap: u32,
    #[serde(rename = "Stint Length (laps)")]
    pub length_laps: usize,
    #[serde(rename = "Stint Time (mins)")]
    pub stint_time_minutes: f64,
    #[serde(rename = "Best Lap (s)")]
    pub best_lap_seconds: f64,
    #[serde(rename = "Median Lap (s)")]
    pub median_lap_seconds: f64,
    #[serde(rename = "Pitstop Lap Time (s)")]
    pub pit_stop_lap_seconds: Option<f64>,
}

impl From<&StintRecord> for StintTableRow {
    fn from(stint: &StintRecord) -> Self {
        Self {
            stint_number: stint.stint_number,
            start_lap: stint.start_lap,
            end_lap: stint.end_lap,
            length_laps: stint.length_laps,
            stint_time_minutes: stint.stint_time_minutes,
            best_lap_seconds: stint.best_lap_seconds,
            median_lap_seconds: stint.median_lap_seconds,
            pit_stop_lap_seconds: stint.pit_stop_lap_seconds,
        }
    }
}

pub fn lap_table_rows(laps: &[LapRecord]) -> Vec<LapTableRow> {
    laps.iter().map(LapTableRow::from).collect()
}

pub fn stint_table_rows(stints: &[StintRecord]) -> Vec<StintTableRow> {
    stints.iter().map(StintTableRow::from).collect()
}

/// Render table rows as a YAML sequence of mappings
pub fn render_yaml<T: Serialize>(rows: &[T]) -> Result<String> {
    serde_yaml_ng::to_string(rows)
        .map_err(|e| TimingError::parse_error("Table rendering", e.to_string()))
}
