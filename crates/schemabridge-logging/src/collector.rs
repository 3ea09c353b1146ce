//! Process-wide record of warnings emitted during a run

use once_cell::sync::OnceCell;
use parking_lot::Mutex;

/// Global warning collector
static COLLECTOR: OnceCell<WarningCollector> = OnceCell::new();

/// Collects the message of every `WARN` or `ERROR` event
///
/// The CLI reads it at the end of a run to print a warning summary, whatever
/// the configured log level.
#[derive(Debug, Default)]
pub struct WarningCollector {
    messages: Mutex<Vec<String>>,
}

impl WarningCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the global collector instance
    pub fn global() -> &'static WarningCollector {
        COLLECTOR.get_or_init(WarningCollector::new)
    }

    pub fn record(&self, message: impl Into<String>) {
        self.messages.lock().push(message.into());
    }

    pub fn count(&self) -> usize {
        self.messages.lock().len()
    }

    /// Copy of everything recorded so far, in emission order
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    /// Drain the recorded messages
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.messages.lock())
    }
}

#[cfg(test)]
#[path = "collector/collector_tests.rs"]
mod collector_tests;
