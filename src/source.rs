//! Source trait for lap data acquisition

use crate::Result;
use crate::types::{RawRow, SourceId};

/// Trait for timing data sources
///
/// A source delivers the raw text rows of one competitor's lap table. How it
/// gets them (browser automation, HTTP, a recorded file) is up to the
/// implementation; the lap table builder takes over from there.
#[async_trait::async_trait]
pub trait LapSource: Send + 'static {
    /// Identity of this source, used as the acquisition cache key
    fn id(&self) -> &SourceId;

    /// Fetch the current lap rows
    ///
    /// Returns:
    /// - `Ok(rows)` - Rows as displayed, possibly malformed or empty
    /// - `Err(e)` - The table could not be retrieved or located
    async fn fetch_rows(&mut self) -> Result<Vec<RawRow>>;
}
