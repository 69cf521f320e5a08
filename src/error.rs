//! Error types for timing analysis.
//!
//! Token-level parse failures and structurally broken rows are never errors:
//! they become absent values and dropped rows inside the lap table builder.
//! The variants here cover what a caller has to react to.
//!
//! ## Error Categories
//!
//! - **Acquisition Errors**: A source could not be fetched, timed out or was cancelled
//! - **Empty Results**: A source was fetched but no row survived cleaning
//! - **Configuration Errors**: Invalid pit threshold or malformed config files
//! - **File Errors**: Problems reading recorded scrape files or configs
//!
//! ## Recovery and Retry
//!
//! ```rust
//! use stintwall::TimingError;
//!
//! let error = TimingError::acquisition_failed("team-7", "timing table not found");
//! if error.is_retryable() {
//!     for suggestion in error.recovery_suggestions() {
//!         println!("  - {}", suggestion);
//!     }
//! }
//! ```

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for timing operations.
pub type Result<T, E = TimingError> = std::result::Result<T, E>;

/// Main error type for timing operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TimingError {
    #[error("Failed to acquire lap data for {source_id}: {reason}")]
    Acquisition {
        source_id: String,
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Acquisition of {source_id} timed out after {duration:?}")]
    Timeout { source_id: String, duration: Duration },

    #[error("Acquisition of {source_id} was cancelled")]
    Cancelled { source_id: String },

    #[error("No usable lap data for {source_id} ({rows_seen} rows received)")]
    NoUsableLapData { source_id: String, rows_seen: usize },

    #[error("No lap data has been acquired for {source_id}")]
    UnknownSource { source_id: String },

    #[error("Pit threshold {value}s is outside the valid range [{min}, {max}]")]
    InvalidThreshold { value: f64, min: f64, max: f64 },

    #[error("Parse error in {context}: {details}")]
    Parse { context: String, details: String },

    #[error("File error: {path}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TimingError {
    /// Returns whether this error is potentially recoverable through retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            TimingError::Acquisition { .. } => true,
            TimingError::Timeout { .. } => true,
            TimingError::NoUsableLapData { .. } => true,
            TimingError::Cancelled { .. } => false,
            TimingError::UnknownSource { .. } => false,
            TimingError::InvalidThreshold { .. } => false,
            TimingError::Parse { .. } => false,
            TimingError::File { .. } => false,
        }
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            TimingError::Acquisition { .. } => vec![
                "Check the timing page URL is correct",
                "Verify the live-timing provider is reachable",
                "Retry on the next refresh",
            ],
            TimingError::Timeout { .. } => vec![
                "Increase the fetch timeout",
                "Check network connectivity to the timing provider",
            ],
            TimingError::Cancelled { .. } => vec!["Start a new acquisition round"],
            TimingError::NoUsableLapData { .. } => vec![
                "Wait until the competitor has completed a timed lap",
                "Check the timing table layout has not changed",
                "Inspect the raw rows for unexpected time formats",
            ],
            TimingError::UnknownSource { .. } => vec![
                "Acquire lap data for the source before analysing it",
                "Check the source identifier spelling",
            ],
            TimingError::InvalidThreshold { .. } => {
                vec!["Choose a pit threshold between 10 and 300 seconds"]
            }
            TimingError::Parse { .. } => vec![
                "Check the YAML syntax of the file",
                "Verify field names match the documented format",
            ],
            TimingError::File { .. } => {
                vec!["Check the file exists and is readable", "Check file permissions"]
            }
        }
    }

    /// Source identifier the error refers to, if any.
    pub fn source_id(&self) -> Option<&str> {
        match self {
            TimingError::Acquisition { source_id, .. }
            | TimingError::Timeout { source_id, .. }
            | TimingError::Cancelled { source_id }
            | TimingError::NoUsableLapData { source_id, .. }
            | TimingError::UnknownSource { source_id } => Some(source_id),
            _ => None,
        }
    }

    /// Helper constructor for acquisition failures.
    pub fn acquisition_failed(source_id: impl Into<String>, reason: impl Into<String>) -> Self {
        TimingError::Acquisition { source_id: source_id.into(), reason: reason.into(), source: None }
    }

    /// Helper constructor for acquisition failures with an underlying cause.
    pub fn acquisition_failed_with_source(
        source_id: impl Into<String>,
        reason: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        TimingError::Acquisition {
            source_id: source_id.into(),
            reason: reason.into(),
            source: Some(source),
        }
    }

    /// Helper constructor for a source whose rows were all dropped.
    pub fn no_usable_lap_data(source_id: impl Into<String>, rows_seen: usize) -> Self {
        TimingError::NoUsableLapData { source_id: source_id.into(), rows_seen }
    }

    /// Helper constructor for file errors with path context.
    pub fn file_error(path: PathBuf, source: std::io::Error) -> Self {
        TimingError::File { path, source }
    }

    /// Helper constructor for parse errors.
    pub fn parse_error(context: impl Into<String>, details: impl Into<String>) -> Self {
        TimingError::Parse { context: context.into(), details: details.into() }
    }
}

impl From<std::io::Error> for TimingError {
    fn from(err: std::io::Error) -> Self {
        TimingError::File { path: PathBuf::from("<unknown>"), source: err }
    }
}
