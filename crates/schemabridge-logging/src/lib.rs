//! schemabridge-logging - Stderr logging and warning capture
//!
//! This crate provides:
//! - [`init_logging`] to install the process subscriber at a [`LogLevel`]
//! - [`WarningLayer`] and [`WarningCollector`] so a run can report how many
//!   warnings it produced, independent of the log level

mod collector;
mod layer;

pub use collector::WarningCollector;
pub use layer::{WarningLayer, init_logging, level_filter, stderr_filter};
pub use schemabridge_core::LogLevel;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{LogLevel, WarningCollector, WarningLayer, init_logging};
}
