//! Core types for lap and stint data.
//!
//! ## Architecture
//!
//! - [`RawRow`] is one scraped timing line, text cells only
//! - [`ParsedLap`] is the per-field optional state after token parsing
//! - [`LapRecord`] is a cleaned lap with the mandatory fields present
//! - [`LapTable`] is the canonical, strictly ascending lap sequence of one source
//! - [`StintRecord`] is one stint with its aggregate figures
//! - [`PitThreshold`] is the validated pit-lap classification threshold
//! - [`SourceId`] identifies one monitored competitor feed
//!
//! ## Usage Example
//!
//! ```rust
//! use stintwall::types::{PitThreshold, RawRow};
//! use stintwall::laps::LapTableBuilder;
//!
//! let rows = vec![
//!     RawRow::from(["1", "4", "", "1:10.500", "12.1", "0.8"]),
//!     RawRow::from(["2", "3", "+1", "1:09.900", "11.4", "0.5"]),
//! ];
//!
//! let table = LapTableBuilder::new().build(&rows);
//! assert_eq!(table.len(), 2);
//! assert!(!PitThreshold::default().is_pit_lap(table.laps()[0].lap_time));
//! ```

mod lap;
mod source;
mod stint;
mod threshold;

pub use lap::{LapRecord, LapTable, ParsedLap, RawRow};
pub use source::SourceId;
pub use stint::StintRecord;
pub use threshold::PitThreshold;
