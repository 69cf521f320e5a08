//! Lap-time normalization
//!
//! Turns scraped timing rows into a canonical [`LapTable`](crate::types::LapTable):
//!
//! ```text
//! RawRow ──► parse_row ──► ParsedLap ──► into_record ──► sort / de-dup ──► LapTable
//!              │                              │
//!              ▼                              ▼
//!        < 4 cells: rejected       no lap number / lap time: dropped
//! ```

mod builder;
mod time;

pub use builder::{BuildStats, LapTableBuilder, MIN_ROW_CELLS};
pub use time::{parse_count, parse_time};
