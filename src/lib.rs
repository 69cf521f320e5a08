//! Lap-time normalization and stint analysis for motorsport live timing.
//!
//! Stintwall takes the per-lap rows scraped from a live-timing page, turns
//! them into a clean lap table and splits that table into stints: runs of
//! laps between pit stops, each with its length, duration, best and median
//! lap.
//!
//! # Features
//!
//! - **Forgiving parsing**: malformed cells become absent values, never errors
//! - **Stint segmentation**: pit laps by threshold, user-chosen lap exclusions
//! - **Explicit caching**: results keyed by the content of their inputs
//! - **Multi-team acquisition**: concurrent sources with per-source failure isolation
//!
//! ## Example
//!
//! ```rust
//! use std::collections::BTreeSet;
//! use stintwall::{LapTableBuilder, PitThreshold, RawRow, segment};
//!
//! let rows = vec![
//!     RawRow::from(["1", "3", "", "1:10.0"]),
//!     RawRow::from(["2", "3", "", "1:12.0"]),
//!     RawRow::from(["3", "5", "-2", "1:35.0"]),
//!     RawRow::from(["4", "4", "+1", "1:11.0"]),
//! ];
//!
//! let table = LapTableBuilder::new().build(&rows);
//! let analysis = segment(table.laps(), PitThreshold::default(), &BTreeSet::new());
//!
//! assert_eq!(analysis.stints.len(), 2);
//! assert_eq!(analysis.stints[0].pit_stop_lap_seconds, Some(95.0));
//! assert!(analysis.stints[1].is_open());
//! ```
//!
//! ## Example (several teams)
//!
//! ```rust,no_run
//! use stintwall::{LapSource, RecordedSource, StintAnalyser};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> stintwall::Result<()> {
//!     let mut sources: Vec<Box<dyn LapSource>> = vec![
//!         Box::new(RecordedSource::open("team_a.yaml")?),
//!         Box::new(RecordedSource::open("team_b.yaml")?),
//!     ];
//!
//!     let mut analyser = StintAnalyser::default();
//!     let report = analyser.acquire(&mut sources).await;
//!     for failure in &report.failures {
//!         eprintln!("{failure}");
//!     }
//!
//!     for (source, analysis) in analyser.analyse_all()? {
//!         println!("{source}: {} stints", analysis.stints.len());
//!     }
//!     Ok(())
//! }
//! ```

// Core types and error handling
mod error;
#[cfg_attr(any(test, feature = "benchmark"), path = "test_utils.rs")]
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;
pub mod types;

// Analysis engine
pub mod cache;
pub mod laps;
pub mod stints;

// Acquisition and orchestration
pub mod acquisition;
mod analyser;
pub mod config;
pub mod source;
pub mod sources;

// Output for the display layer
pub mod report;

// Core exports
pub use error::*;
pub use types::*;

pub use analyser::{AcquisitionReport, StintAnalyser};
pub use cache::{ContentCache, SegmentationKey};
pub use config::AnalysisConfig;
pub use laps::{LapTableBuilder, parse_time};
pub use source::LapSource;
pub use sources::{RecordedSource, StaticSource};
pub use stints::{StintAnalysis, segment, summarize};
