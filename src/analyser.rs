//! Stateful entry point tying acquisition, caching and segmentation together

use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::acquisition::Acquisition;
use crate::cache::{CacheStats, ContentCache, SegmentationKey};
use crate::config::{AnalysisConfig, MAX_SOURCES};
use crate::report::{ExclusionCandidate, TeamNames, exclusion_candidates};
use crate::source::LapSource;
use crate::stints::{StintAnalysis, segment};
use crate::types::{LapTable, PitThreshold, SourceId};
use crate::{Result, TimingError};

/// Outcome of one acquisition round
#[derive(Debug, Default)]
pub struct AcquisitionReport {
    /// Sources with a usable lap table, in input order
    pub acquired: Vec<SourceId>,
    /// Sources served from the acquisition cache without fetching
    pub cached: Vec<SourceId>,
    /// One error per failed source
    pub failures: Vec<TimingError>,
}

impl AcquisitionReport {
    pub fn has_data(&self) -> bool {
        !self.acquired.is_empty()
    }
}

/// Owns configuration and both result caches for a set of sources.
///
/// Lap tables are cached by source identity; stint analyses by the content
/// of the lap table, the threshold and the exclusion set. Changing the
/// threshold or an exclusion set yields a new key, so results for previous
/// settings stay available when the settings are switched back.
#[derive(Debug)]
pub struct StintAnalyser {
    config: AnalysisConfig,
    acquisition: Acquisition,
    tables: ContentCache<SourceId, LapTable>,
    analyses: ContentCache<SegmentationKey, StintAnalysis>,
    order: Vec<SourceId>,
}

impl Default for StintAnalyser {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

impl StintAnalyser {
    pub fn new(config: AnalysisConfig) -> Self {
        let acquisition = Acquisition::new(config.fetch_timeout());
        Self {
            config,
            acquisition,
            tables: ContentCache::new(),
            analyses: ContentCache::new(),
            order: Vec::new(),
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Change the pit threshold, validating the range
    pub fn set_pit_threshold(&mut self, seconds: f64) -> Result<()> {
        self.config.pit_threshold = PitThreshold::new(seconds)?;
        debug!(threshold = seconds, "Pit threshold changed");
        Ok(())
    }

    /// Replace the exclusion set of one source
    pub fn set_exclusions(&mut self, source: &SourceId, laps: impl IntoIterator<Item = u32>) {
        self.config.set_exclusions(source.clone(), laps);
    }

    /// Fetch every source not already cached, concurrently.
    ///
    /// `sources` is the monitored list for this round. Repeated ids are
    /// fetched once and at most [`MAX_SOURCES`] distinct sources are taken.
    /// A failing source is recorded in the report and does not affect the
    /// others. Afterwards [`sources`](Self::sources) holds exactly the
    /// sources of this round that have a lap table.
    pub async fn acquire(&mut self, sources: &mut [Box<dyn LapSource>]) -> AcquisitionReport {
        let mut report = AcquisitionReport::default();

        let mut seen = BTreeSet::new();
        let selected: Vec<bool> = sources
            .iter()
            .map(|source| seen.len() < MAX_SOURCES && seen.insert(source.id().clone()))
            .collect();
        let skipped = selected.iter().filter(|keep| !**keep).count();
        if skipped > 0 {
            warn!(skipped, max = MAX_SOURCES, "Ignoring repeated or surplus sources");
        }

        for (source, _) in sources.iter().zip(&selected).filter(|(_, keep)| **keep) {
            if self.tables.contains(source.id()) {
                report.cached.push(source.id().clone());
            }
        }

        let tables = &self.tables;
        let pending = sources
            .iter_mut()
            .zip(&selected)
            .filter(|(source, keep)| **keep && !tables.contains(source.id()))
            .map(|(source, _)| source);
        let outcomes = self.acquisition.collect(pending).await;

        let mut fetched = Vec::new();
        for outcome in outcomes {
            match outcome.result {
                Ok((table, _)) => {
                    self.tables.insert(outcome.source_id.clone(), table);
                    fetched.push(outcome.source_id);
                }
                Err(e) => report.failures.push(e),
            }
        }

        for (source, _) in sources.iter().zip(&selected).filter(|(_, keep)| **keep) {
            let id = source.id();
            if report.cached.contains(id) || fetched.contains(id) {
                report.acquired.push(id.clone());
            }
        }
        self.order.clone_from(&report.acquired);

        info!(
            acquired = report.acquired.len(),
            cached = report.cached.len(),
            failed = report.failures.len(),
            "Acquisition round complete"
        );

        report
    }

    /// Sources of the latest round with a lap table, in input order
    pub fn sources(&self) -> &[SourceId] {
        &self.order
    }

    /// Cached lap table of a source
    pub fn table(&self, source: &SourceId) -> Result<Arc<LapTable>> {
        self.tables
            .get(source)
            .ok_or_else(|| TimingError::UnknownSource { source_id: source.to_string() })
    }

    /// Stint analysis of one source under the current threshold and its exclusions
    pub fn analyse(&mut self, source: &SourceId) -> Result<Arc<StintAnalysis>> {
        let table = self.table(source)?;
        let threshold = self.config.pit_threshold;
        let excluded = self.config.excluded_laps(source);
        Ok(self.analyse_table(&table, threshold, &excluded))
    }

    /// Stint analysis of every source of the latest round, in input order
    pub fn analyse_all(&mut self) -> Result<Vec<(SourceId, Arc<StintAnalysis>)>> {
        self.order
            .clone()
            .into_iter()
            .map(|source| self.analyse(&source).map(|analysis| (source, analysis)))
            .collect()
    }

    /// Cached segmentation of an arbitrary table
    pub fn analyse_table(
        &mut self,
        table: &LapTable,
        threshold: PitThreshold,
        excluded: &BTreeSet<u32>,
    ) -> Arc<StintAnalysis> {
        let key = SegmentationKey::new(table, threshold, excluded);
        self.analyses.get_or_insert_with(key, || segment(table.laps(), threshold, excluded))
    }

    /// Display names for the acquired sources
    pub fn team_names(&self) -> TeamNames {
        TeamNames::assign(&self.order, &self.config.team_names)
    }

    /// Laps of a source above the current threshold
    pub fn exclusion_candidates(&self, source: &SourceId) -> Result<Vec<ExclusionCandidate>> {
        let table = self.table(source)?;
        Ok(exclusion_candidates(&table, self.config.pit_threshold))
    }

    /// Counters of the lap table cache and the analysis cache
    pub fn cache_stats(&self) -> (CacheStats, CacheStats) {
        (self.tables.stats(), self.analyses.stats())
    }

    /// Drop every cached table and analysis
    pub fn clear_caches(&mut self) {
        self.tables.clear();
        self.analyses.clear();
        self.order.clear();
    }
}
