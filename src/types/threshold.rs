//! Pit-lap classification threshold

use serde::{Deserialize, Serialize};

use crate::{Result, TimingError};

/// Lap time above which a lap is treated as containing a pit stop.
///
/// Always within `[MIN_SECONDS, MAX_SECONDS]`; construction outside the range fails.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct PitThreshold(f64);

impl PitThreshold {
    /// Lowest accepted threshold in seconds
    pub const MIN_SECONDS: f64 = 10.0;
    /// Highest accepted threshold in seconds
    pub const MAX_SECONDS: f64 = 300.0;
    /// Threshold used when none is configured
    pub const DEFAULT_SECONDS: f64 = 80.0;

    /// Validate and wrap a threshold in seconds
    pub fn new(seconds: f64) -> Result<Self> {
        if !(Self::MIN_SECONDS..=Self::MAX_SECONDS).contains(&seconds) {
            return Err(TimingError::InvalidThreshold {
                value: seconds,
                min: Self::MIN_SECONDS,
                max: Self::MAX_SECONDS,
            });
        }
        Ok(Self(seconds))
    }

    /// Threshold in seconds
    pub fn seconds(self) -> f64 {
        self.0
    }

    /// Strict comparison: a lap exactly at the threshold is not a pit lap
    pub fn is_pit_lap(self, lap_time: f64) -> bool {
        lap_time > self.0
    }

    /// Bit pattern used in cache keys
    pub(crate) fn key_bits(self) -> u64 {
        self.0.to_bits()
    }
}

impl Default for PitThreshold {
    fn default() -> Self {
        Self(Self::DEFAULT_SECONDS)
    }
}

impl TryFrom<f64> for PitThreshold {
    type Error = TimingError;

    fn try_from(seconds: f64) -> Result<Self> {
        Self::new(seconds)
    }
}

impl From<PitThreshold> for f64 {
    fn from(threshold: PitThreshold) -> Self {
        threshold.0
    }
}
