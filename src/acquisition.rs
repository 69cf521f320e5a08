//! Concurrent acquisition of lap tables from several sources
//!
//! Each source runs through its own fetch → build pipeline. A failing,
//! slow or empty source is reported on its own and never stops the others.

use futures::future::join_all;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::laps::{BuildStats, LapTableBuilder};
use crate::source::LapSource;
use crate::types::{LapTable, SourceId};
use crate::{Result, TimingError};

/// Default per-source fetch timeout
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Outcome of acquiring one source
#[derive(Debug)]
pub struct SourceOutcome {
    pub source_id: SourceId,
    pub result: Result<(LapTable, BuildStats)>,
}

/// Fetches rows from sources and builds their lap tables
#[derive(Debug, Clone)]
pub struct Acquisition {
    timeout: Duration,
    cancel: CancellationToken,
    builder: LapTableBuilder,
}

impl Default for Acquisition {
    fn default() -> Self {
        Self::new(DEFAULT_FETCH_TIMEOUT)
    }
}

impl Acquisition {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout, cancel: CancellationToken::new(), builder: LapTableBuilder::new() }
    }

    /// Use an externally owned cancellation token
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Token that aborts in-flight fetches when cancelled
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch one source and build its lap table.
    ///
    /// Fails with [`TimingError::NoUsableLapData`] when rows arrived but none survived cleaning.
    pub async fn fetch_table<S>(&self, source: &mut S) -> Result<(LapTable, BuildStats)>
    where
        S: LapSource + ?Sized,
    {
        let source_id = source.id().clone();
        debug!(source = %source_id, "Fetching lap rows");

        let rows = tokio::select! {
            _ = self.cancel.cancelled() => {
                return Err(TimingError::Cancelled { source_id: source_id.to_string() });
            }
            fetched = tokio::time::timeout(self.timeout, source.fetch_rows()) => match fetched {
                Ok(rows) => rows?,
                Err(_) => {
                    return Err(TimingError::Timeout {
                        source_id: source_id.to_string(),
                        duration: self.timeout,
                    });
                }
            },
        };

        let (table, stats) = self.builder.build_with_stats(&rows);
        if table.is_empty() {
            return Err(TimingError::no_usable_lap_data(source_id.as_str(), stats.rows_seen));
        }

        Ok((table, stats))
    }

    /// Acquire sources concurrently, one outcome per source in input order
    pub async fn collect<'a, I>(&self, sources: I) -> Vec<SourceOutcome>
    where
        I: IntoIterator<Item = &'a mut Box<dyn LapSource>>,
    {
        let sources: Vec<&'a mut Box<dyn LapSource>> = sources.into_iter().collect();
        info!(sources = sources.len(), "Acquiring lap data");

        let outcomes = join_all(sources.into_iter().map(|source| async move {
            let source_id = source.id().clone();
            let result = self.fetch_table(source.as_mut()).await;
            SourceOutcome { source_id, result }
        }))
        .await;

        for outcome in &outcomes {
            match &outcome.result {
                Ok((table, _)) => {
                    debug!(source = %outcome.source_id, laps = table.len(), "Source acquired");
                }
                Err(e) => warn!(source = %outcome.source_id, "Source failed: {}", e),
            }
        }

        outcomes
    }
}
