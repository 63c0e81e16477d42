//! Bulk validation: table input, the sequential runner and result export.

pub mod export;
pub mod input;
pub mod runner;

pub use export::ExportFormat;
pub use input::EmailTable;
pub use runner::{BatchRunner, NoProgress, Progress, ProgressSink};
