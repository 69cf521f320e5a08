//! In-memory source for rows that were already extracted

use crate::source::LapSource;
use crate::types::{RawRow, SourceId};
use crate::{Result, TimingError};

/// Source that hands out a fixed set of rows, or a fixed failure
#[derive(Debug, Clone)]
pub struct StaticSource {
    id: SourceId,
    rows: std::result::Result<Vec<RawRow>, String>,
}

impl StaticSource {
    /// Source yielding `rows` on every fetch
    pub fn new(id: impl Into<SourceId>, rows: Vec<RawRow>) -> Self {
        Self { id: id.into(), rows: Ok(rows) }
    }

    /// Source whose fetch always fails with `reason`
    pub fn failing(id: impl Into<SourceId>, reason: impl Into<String>) -> Self {
        Self { id: id.into(), rows: Err(reason.into()) }
    }
}

#[async_trait::async_trait]
impl LapSource for StaticSource {
    fn id(&self) -> &SourceId {
        &self.id
    }

    async fn fetch_rows(&mut self) -> Result<Vec<RawRow>> {
        match &self.rows {
            Ok(rows) => Ok(rows.clone()),
            Err(reason) => Err(TimingError::acquisition_failed(self.id.as_str(), reason.clone())),
        }
    }
}
