//! Recorded source for captured scrape results
//!
//! A recording is a YAML document holding the source identity and the rows
//! exactly as they were extracted:
//!
//! ```yaml
//! source: https://timing.example/session/42/competitor/7
//! rows:
//!   - ["1", "12", "", "1:48.331", "1:02.114", "2.301"]
//!   - ["2", "11", "+1", "1:46.902", "59.870", "0.944"]
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::source::LapSource;
use crate::types::{RawRow, SourceId};
use crate::{Result, TimingError};

/// On-disk format of a recording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    pub source: SourceId,
    #[serde(default)]
    pub rows: Vec<RawRow>,
}

impl Recording {
    /// Parse a recording from YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml)
            .map_err(|e| TimingError::parse_error("Recorded scrape", e.to_string()))
    }

    /// Serialize the recording to YAML text
    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml_ng::to_string(self)
            .map_err(|e| TimingError::parse_error("Recorded scrape", e.to_string()))
    }
}

/// Source that re-reads a recording file on every fetch
#[derive(Debug, Clone)]
pub struct RecordedSource {
    id: SourceId,
    path: PathBuf,
}

impl RecordedSource {
    /// Open a recording, reading its source identity
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let recording = read_recording(&path)?;
        info!("Opened recording {} for {}", path.display(), recording.source);
        Ok(Self { id: recording.source, path })
    }

    /// Path of the recording file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl LapSource for RecordedSource {
    fn id(&self) -> &SourceId {
        &self.id
    }

    /// Re-reads the file on a blocking thread so slow disks do not stall other fetches.
    async fn fetch_rows(&mut self) -> Result<Vec<RawRow>> {
        let path = self.path.clone();
        let read = tokio::task::spawn_blocking(move || read_recording(&path))
            .await
            .map_err(|e| {
                TimingError::acquisition_failed_with_source(
                    self.id.as_str(),
                    "recording reader task failed",
                    Box::new(e),
                )
            })?;
        let recording = read.map_err(|e| {
            TimingError::acquisition_failed_with_source(
                self.id.as_str(),
                format!("cannot read {}", self.path.display()),
                Box::new(e),
            )
        })?;
        debug!(source = %self.id, rows = recording.rows.len(), "Read recorded rows");
        Ok(recording.rows)
    }
}

fn read_recording(path: &Path) -> Result<Recording> {
    let yaml = std::fs::read_to_string(path)
        .map_err(|e| TimingError::file_error(path.to_path_buf(), e))?;
    Recording::from_yaml_str(&yaml)
}
