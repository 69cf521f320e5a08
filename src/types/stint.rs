//! Stint summary record

use serde::{Deserialize, Serialize};

/// One continuous running period between pit stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StintRecord {
    /// 1-based, gap-free emission order
    pub stint_number: u32,
    /// First retained lap of the stint
    pub start_lap: u32,
    /// Last retained lap of the stint
    pub end_lap: u32,
    /// Number of retained laps, never zero
    pub length_laps: usize,
    /// Sum of lap times in minutes, 2 decimals
    pub stint_time_minutes: f64,
    /// Fastest lap in seconds, 3 decimals
    pub best_lap_seconds: f64,
    /// Median lap in seconds, 3 decimals
    pub median_lap_seconds: f64,
    /// Time of the pit lap that ended the stint; `None` while the stint is still running
    pub pit_stop_lap_seconds: Option<f64>,
}

impl StintRecord {
    /// Whether the session is still in this stint
    pub fn is_open(&self) -> bool {
        self.pit_stop_lap_seconds.is_none()
    }
}
