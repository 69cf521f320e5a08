//! Lap representations from raw scrape to canonical table

use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// One displayed lap line as extracted text cells.
///
/// Cell order is fixed: lap number, position, position change, lap time, gap, interval.
/// Sources may omit the trailing gap/interval cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRow {
    pub cells: Vec<String>,
}

impl RawRow {
    /// Create a row from text cells
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Cell at a column index, if the row is wide enough
    pub fn cell(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }

    /// Number of cells in the row
    pub fn width(&self) -> usize {
        self.cells.len()
    }
}

impl<S: AsRef<str>, const N: usize> From<[S; N]> for RawRow {
    fn from(cells: [S; N]) -> Self {
        Self { cells: cells.iter().map(|c| c.as_ref().to_string()).collect() }
    }
}

impl From<Vec<String>> for RawRow {
    fn from(cells: Vec<String>) -> Self {
        Self { cells }
    }
}

/// A lap after per-field parsing, before the mandatory-field filter.
///
/// Every field is optional so a lap with an unparsable time is a value that
/// can be inspected rather than a silently missing row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedLap {
    pub lap_number: Option<u32>,
    pub position: Option<u32>,
    pub position_change: Option<String>,
    pub lap_time: Option<f64>,
    pub gap: Option<f64>,
    pub interval: Option<f64>,
}

impl ParsedLap {
    /// Promote to a [`LapRecord`] when lap number and a non-negative lap time are present
    pub fn into_record(self) -> Option<LapRecord> {
        let lap_number = self.lap_number?;
        let lap_time = self.lap_time.filter(|t| *t >= 0.0)?;
        Some(LapRecord {
            lap_number,
            position: self.position,
            position_change: self.position_change,
            lap_time,
            gap: self.gap,
            interval: self.interval,
        })
    }
}

/// A cleaned lap. Lap number and lap time are always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LapRecord {
    /// Lap number within the session
    pub lap_number: u32,
    /// Running classification position
    pub position: Option<u32>,
    /// Position change as displayed by the provider
    pub position_change: Option<String>,
    /// Lap time in seconds
    pub lap_time: f64,
    /// Gap to the reference competitor in seconds
    pub gap: Option<f64>,
    /// Interval to the car ahead in seconds
    pub interval: Option<f64>,
}

impl LapRecord {
    /// Minimal record with only the mandatory fields
    pub fn new(lap_number: u32, lap_time: f64) -> Self {
        Self {
            lap_number,
            position: None,
            position_change: None,
            lap_time,
            gap: None,
            interval: None,
        }
    }

    fn hash_content<H: Hasher>(&self, state: &mut H) {
        self.lap_number.hash(state);
        self.position.hash(state);
        self.position_change.hash(state);
        self.lap_time.to_bits().hash(state);
        self.gap.map(f64::to_bits).hash(state);
        self.interval.map(f64::to_bits).hash(state);
    }
}

/// Canonical lap sequence of one source.
///
/// Strictly ascending by lap number with no duplicates. Only the lap table
/// builder constructs it, and it is never modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct LapTable {
    laps: Vec<LapRecord>,
    fingerprint: u64,
}

impl LapTable {
    /// Wrap laps that are already sorted and de-duplicated
    pub(crate) fn from_canonical(laps: Vec<LapRecord>) -> Self {
        debug_assert!(laps.windows(2).all(|w| w[0].lap_number < w[1].lap_number));

        let mut hasher = DefaultHasher::new();
        laps.len().hash(&mut hasher);
        for lap in &laps {
            lap.hash_content(&mut hasher);
        }
        let fingerprint = hasher.finish();

        Self { laps, fingerprint }
    }

    /// All laps in ascending lap-number order
    pub fn laps(&self) -> &[LapRecord] {
        &self.laps
    }

    pub fn len(&self) -> usize {
        self.laps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.laps.is_empty()
    }

    /// Look up a lap by number
    pub fn get(&self, lap_number: u32) -> Option<&LapRecord> {
        self.laps
            .binary_search_by_key(&lap_number, |lap| lap.lap_number)
            .ok()
            .map(|index| &self.laps[index])
    }

    /// Highest lap number in the table
    pub fn last_lap_number(&self) -> Option<u32> {
        self.laps.last().map(|lap| lap.lap_number)
    }

    /// Content-derived identity used for cache keys
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }
}
