//! Raw timing rows to canonical lap table

use std::collections::BTreeMap;
use tracing::{debug, trace};

use super::time::{parse_count, parse_time};
use crate::types::{LapRecord, LapTable, ParsedLap, RawRow};

/// Minimum number of cells for a row to be considered a lap line
pub const MIN_ROW_CELLS: usize = 4;

const COL_LAP_NUMBER: usize = 0;
const COL_POSITION: usize = 1;
const COL_POSITION_CHANGE: usize = 2;
const COL_LAP_TIME: usize = 3;
const COL_GAP: usize = 4;
const COL_INTERVAL: usize = 5;

/// Counters describing what happened to the rows of one build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Rows handed to the builder
    pub rows_seen: usize,
    /// Rows with fewer than [`MIN_ROW_CELLS`] cells
    pub structurally_invalid: usize,
    /// Rows missing a lap number or a usable lap time
    pub missing_mandatory: usize,
    /// Rows superseded by a later row with the same lap number
    pub duplicates: usize,
}

impl BuildStats {
    /// Number of laps that made it into the table
    pub fn retained(&self) -> usize {
        self.rows_seen - self.structurally_invalid - self.missing_mandatory - self.duplicates
    }
}

/// Builds [`LapTable`]s from raw rows.
#[derive(Debug, Clone, Default)]
pub struct LapTableBuilder;

impl LapTableBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Parse one row field by field. Returns `None` for structurally invalid rows.
    pub fn parse_row(&self, row: &RawRow) -> Option<ParsedLap> {
        if row.width() < MIN_ROW_CELLS {
            return None;
        }

        Some(ParsedLap {
            lap_number: row.cell(COL_LAP_NUMBER).and_then(parse_count),
            position: row.cell(COL_POSITION).and_then(parse_count),
            position_change: row
                .cell(COL_POSITION_CHANGE)
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
            lap_time: row.cell(COL_LAP_TIME).and_then(parse_time),
            gap: row.cell(COL_GAP).and_then(parse_time),
            interval: row.cell(COL_INTERVAL).and_then(parse_time),
        })
    }

    /// Parse every structurally valid row, keeping unparsable fields as `None`
    pub fn parse_rows(&self, rows: &[RawRow]) -> Vec<ParsedLap> {
        rows.iter().filter_map(|row| self.parse_row(row)).collect()
    }

    /// Build the canonical lap table
    pub fn build(&self, rows: &[RawRow]) -> LapTable {
        self.build_with_stats(rows).0
    }

    /// Build the canonical lap table and report how rows were treated.
    ///
    /// When two rows carry the same lap number the one appearing later in
    /// `rows` is kept.
    pub fn build_with_stats(&self, rows: &[RawRow]) -> (LapTable, BuildStats) {
        let mut stats = BuildStats { rows_seen: rows.len(), ..BuildStats::default() };
        let mut by_lap: BTreeMap<u32, LapRecord> = BTreeMap::new();

        for (index, row) in rows.iter().enumerate() {
            let Some(parsed) = self.parse_row(row) else {
                trace!(row = index, width = row.width(), "Rejecting structurally invalid row");
                stats.structurally_invalid += 1;
                continue;
            };

            let Some(record) = parsed.into_record() else {
                trace!(row = index, "Dropping row without lap number or lap time");
                stats.missing_mandatory += 1;
                continue;
            };

            if let Some(previous) = by_lap.insert(record.lap_number, record) {
                trace!(lap = previous.lap_number, "Superseding duplicate lap");
                stats.duplicates += 1;
            }
        }

        let table = LapTable::from_canonical(by_lap.into_values().collect());

        debug!(
            rows = stats.rows_seen,
            retained = table.len(),
            invalid = stats.structurally_invalid,
            unparsable = stats.missing_mandatory,
            duplicates = stats.duplicates,
            "Built lap table"
        );

        (table, stats)
    }
}
