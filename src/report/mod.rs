//! Presentation-facing output
//!
//! Tables carry the exact column identifiers the display layer binds to;
//! the comparison helpers replace per-team formatting callbacks with plain
//! functions taking every value they need.

mod compare;
mod tables;

pub use compare::{
    ExclusionCandidate, LapWindow, PlotMetric, PlotPoint, TeamNames, axis_limits,
    exclusion_candidates, exclusion_label, plot_series,
};
pub use tables::{
    LapTableRow, StintTableRow, lap_table_rows, render_yaml, stint_table_rows,
};
