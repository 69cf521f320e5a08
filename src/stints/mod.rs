//! Stint segmentation and statistics
//!
//! ```text
//! LapTable ──► drop excluded laps ──► classify pit laps ──► group runs ──► summarize
//!                     │                                                       │
//!                     ▼                                                       ▼
//!               filtered_laps                                          StintRecord[]
//! ```

mod segmenter;
mod statistics;

pub use segmenter::segment;
pub use statistics::{StintSummary, round_to, summarize};

use crate::types::{LapRecord, StintRecord};

/// Result of one segmentation run
#[derive(Debug, Clone, PartialEq)]
pub struct StintAnalysis {
    /// Stints in emission order
    pub stints: Vec<StintRecord>,
    /// Laps left after removing excluded lap numbers, used for plotting
    pub filtered_laps: Vec<LapRecord>,
    /// Lap numbers classified as pit laps
    pub pit_laps: Vec<u32>,
}

impl StintAnalysis {
    /// The stint the session is still in, if any
    pub fn open_stint(&self) -> Option<&StintRecord> {
        self.stints.last().filter(|stint| stint.is_open())
    }

    /// Number of completed pit stops that closed a stint
    pub fn completed_stints(&self) -> usize {
        self.stints.iter().filter(|stint| !stint.is_open()).count()
    }
}
