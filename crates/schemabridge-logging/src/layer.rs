//! Subscriber setup: compact stderr output plus warning capture

use crate::collector::WarningCollector;
use once_cell::sync::OnceCell;
use schemabridge_core::LogLevel;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;

/// Tracing layer that records warning and error events in a [`WarningCollector`]
pub struct WarningLayer {
    collector: &'static WarningCollector,
}

impl WarningLayer {
    /// Create a layer feeding the global collector
    pub fn new() -> Self {
        Self {
            collector: WarningCollector::global(),
        }
    }

    /// Create a layer with a specific collector
    pub fn with_collector(collector: &'static WarningCollector) -> Self {
        Self { collector }
    }

    fn is_warning(level: &Level) -> bool {
        *level <= Level::WARN
    }
}

impl Default for WarningLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Layer<S> for WarningLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !Self::is_warning(event.metadata().level()) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        self.collector.record(visitor.message.unwrap_or_default());
    }
}

/// Visitor to extract the message field from tracing events
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" || self.message.is_none() {
            self.message = Some(format!("{:?}", value));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" || self.message.is_none() {
            self.message = Some(value.to_string());
        }
    }
}

/// Convert LogLevel to tracing LevelFilter
pub fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Trace => LevelFilter::TRACE,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Off => LevelFilter::OFF,
    }
}

/// Filter for the stderr layer; the environment is not consulted
pub fn stderr_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::default().add_directive(level_filter(level).into())
}

/// Initialize logging for the process
///
/// Installs a registry with a compact stderr layer filtered at `level` and an
/// unfiltered [`WarningLayer`]. Only the first call has any effect.
pub fn init_logging(level: LogLevel) {
    use tracing_subscriber::prelude::*;

    static INITIALIZED: OnceCell<()> = OnceCell::new();

    INITIALIZED.get_or_init(|| {
        let stderr = tracing_subscriber::fmt::layer()
            .compact()
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_filter(stderr_filter(level));

        let subscriber = tracing_subscriber::registry()
            .with(stderr)
            .with(WarningLayer::new());

        // Try to set as global default (ignore error if already set)
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}
