//! User-facing façade: configuration, construction and the leveled
//! entry points.

use serde_json::Value;
use std::sync::Arc;

use crate::console::ConsoleSink;
use crate::dispatch::{Dispatcher, ErrorHandler};
use crate::enrich;
use crate::level::Level;
use crate::normalize::{self, CallShape, LogContent, ValidationError};
use crate::record::LogRecord;
use crate::sink::Sink;

/// Construction-time configuration for a [`Logger`].
///
/// **Fields**
/// - `sinks`: delivery backends, registered in order.
/// - `use_default_console_sink`: append a [`ConsoleSink`] after the
///   user-supplied sinks.
/// - `silent`: run normalization and enrichment but never invoke a sink.
/// - `min_level`: records less severe than this are dropped before
///   enrichment; `None` allows everything.
/// - `service_name`: injected by the enrichment chain when the caller
///   supplies none.
/// - `on_error`: replaces the default delivery-error handler (print to
///   standard error) entirely.
#[derive(Clone)]
pub struct LoggerConfig {
    pub sinks: Vec<Arc<dyn Sink>>,
    pub use_default_console_sink: bool,
    pub silent: bool,
    pub min_level: Option<Level>,
    pub service_name: Option<String>,
    pub on_error: Option<ErrorHandler>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        LoggerConfig {
            sinks: Vec::new(),
            use_default_console_sink: true,
            silent: false,
            min_level: None,
            service_name: None,
            on_error: None,
        }
    }
}

/// Structured-logging façade.
///
/// Every call shape funnels through the same pipeline: shape resolution,
/// threshold gate, enrichment, fan-out. Cheap to clone; clones share the
/// sink set and error channel. Logging methods are fire-and-forget and
/// must be called within a Tokio runtime, which carries the deliveries.
#[derive(Clone)]
pub struct Logger {
    dispatcher: Arc<Dispatcher>,
    min_level: Option<Level>,
    service_name: Option<String>,
}

impl Logger {
    pub fn new(config: LoggerConfig) -> Self {
        let dispatcher = Dispatcher::new(config.on_error, config.silent);
        for sink in config.sinks {
            dispatcher.add_sink(sink);
        }
        if config.use_default_console_sink {
            dispatcher.add_sink(Arc::new(ConsoleSink::new()));
        }

        Logger {
            dispatcher: Arc::new(dispatcher),
            min_level: config.min_level,
            service_name: config.service_name,
        }
    }

    /// Logger with the default configuration: a console sink and nothing
    /// else.
    pub fn with_defaults() -> Self {
        Logger::new(LoggerConfig::default())
    }

    /// Register an additional sink on a live logger.
    pub fn add_sink(&self, sink: Arc<dyn Sink>) {
        self.dispatcher.add_sink(sink);
    }

    /// Remove every sink with the given name.
    pub fn remove_sink(&self, name: &str) {
        self.dispatcher.remove_sink(name);
    }

    /// Log at an explicit level.
    ///
    /// `content` accepts a message string, a JSON object for
    /// structured-only entries, or a `(message, meta)` pair.
    pub fn log(&self, level: Level, content: impl Into<LogContent>) {
        self.submit(normalize::normalize_leveled(level, content.into()));
    }

    /// Log a message with attached structured meta.
    ///
    /// A `message` key inside `meta` never overrides the explicit
    /// argument.
    pub fn log_with(&self, level: Level, message: impl Into<String>, meta: Value) {
        self.log(level, (message.into(), meta));
    }

    /// Log a single object carrying its own `level` key.
    ///
    /// **Returns**
    /// - `Err(ValidationError)` when the object's level is missing, not
    ///   a string, or outside the fixed set; nothing is dispatched.
    pub fn log_record(&self, record: Value) -> Result<(), ValidationError> {
        let record = normalize::normalize(CallShape::Record(normalize::meta_object(record)))?;
        self.submit(record);
        Ok(())
    }

    /// Log at an explicit level and run `callback` once dispatch has
    /// been initiated for the call.
    ///
    /// Delivery may still be in flight — the callback signals the call
    /// completed, not that any sink accepted the record. It also runs
    /// when the record was gated out or the logger is silent.
    pub fn log_with_callback(
        &self,
        level: Level,
        content: impl Into<LogContent>,
        callback: impl FnOnce() + Send,
    ) {
        self.log(level, content);
        callback();
    }

    pub fn error(&self, content: impl Into<LogContent>) {
        self.log(Level::Error, content);
    }

    pub fn warn(&self, content: impl Into<LogContent>) {
        self.log(Level::Warn, content);
    }

    pub fn info(&self, content: impl Into<LogContent>) {
        self.log(Level::Info, content);
    }

    pub fn debug(&self, content: impl Into<LogContent>) {
        self.log(Level::Debug, content);
    }

    pub fn verbose(&self, content: impl Into<LogContent>) {
        self.log(Level::Verbose, content);
    }

    pub fn silly(&self, content: impl Into<LogContent>) {
        self.log(Level::Silly, content);
    }

    fn submit(&self, record: LogRecord) {
        if let Some(min) = self.min_level {
            // Gate before enrichment so filtered records cost nothing more.
            if !min.permits(record.level) {
                return;
            }
        }

        let record = enrich::enrich(record, self.service_name.as_deref());
        self.dispatcher.dispatch(record);
    }
}
