//! Analysis configuration
//!
//! ```yaml
//! pit_threshold: 85
//! fetch_timeout_secs: 20
//! sources:
//!   - https://timing.example/competitor/7
//!   - https://timing.example/competitor/12
//! exclusions:
//!   https://timing.example/competitor/7: [14, 15]
//! team_names:
//!   https://timing.example/competitor/7: Blue Racing
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::time::Duration;
use tracing::warn;

use crate::acquisition::DEFAULT_FETCH_TIMEOUT;
use crate::types::{PitThreshold, SourceId};
use crate::{Result, TimingError};

/// Maximum number of sources compared side by side
pub const MAX_SOURCES: usize = 5;

/// Configuration consumed by the analysis core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Pit-lap threshold shared by all sources
    pub pit_threshold: PitThreshold,
    /// Per-source fetch timeout in seconds
    pub fetch_timeout_secs: u64,
    /// Monitored sources in display order
    pub sources: Vec<SourceId>,
    /// Lap numbers removed from analysis, per source
    pub exclusions: BTreeMap<SourceId, BTreeSet<u32>>,
    /// Display names, per source
    pub team_names: BTreeMap<SourceId, String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            pit_threshold: PitThreshold::default(),
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT.as_secs(),
            sources: Vec::new(),
            exclusions: BTreeMap::new(),
            team_names: BTreeMap::new(),
        }
    }
}

impl AnalysisConfig {
    /// Parse configuration from YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let mut config: Self = serde_yaml_ng::from_str(yaml)
            .map_err(|e| TimingError::parse_error("Analysis config", e.to_string()))?;
        if config.sources.len() > MAX_SOURCES {
            warn!(
                configured = config.sources.len(),
                max = MAX_SOURCES,
                "Too many sources configured, ignoring the rest"
            );
            config.sources.truncate(MAX_SOURCES);
        }
        Ok(config)
    }

    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| TimingError::file_error(path.to_path_buf(), e))?;
        Self::from_yaml_str(&yaml)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Excluded lap numbers for a source; empty when none are configured
    pub fn excluded_laps(&self, source: &SourceId) -> BTreeSet<u32> {
        self.exclusions.get(source).cloned().unwrap_or_default()
    }

    /// Replace the exclusion set of one source
    pub fn set_exclusions(&mut self, source: SourceId, laps: impl IntoIterator<Item = u32>) {
        self.exclusions.insert(source, laps.into_iter().collect());
    }
}

/// Parse a pasted list of sources, one per line.
///
/// Lines are trimmed, blank lines skipped and at most [`MAX_SOURCES`] kept.
pub fn parse_source_list(text: &str) -> Vec<SourceId> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(MAX_SOURCES)
        .map(SourceId::from)
        .collect()
}
