//! Lap source implementations

pub mod memory;
pub mod recorded;

pub use memory::StaticSource;
pub use recorded::{RecordedSource, Recording};
