//! Fan-out of enriched records to registered sinks.

use std::sync::{Arc, PoisonError, RwLock};

use crate::record::LogRecord;
use crate::sink::Sink;

/// A sink rejected a record.
///
/// Carried on the dispatcher's error channel, never raised back into the
/// logging call.
#[derive(thiserror::Error, Debug, Clone)]
#[error("sink {sink:?} failed to deliver record: {message}")]
pub struct DeliveryError {
    /// `Sink::name` of the failing sink.
    pub sink: String,
    /// Human-readable failure description.
    pub message: String,
}

/// Handler invoked for every [`DeliveryError`].
pub type ErrorHandler = Arc<dyn Fn(DeliveryError) + Send + Sync>;

/// Owns the ordered sink set and the error channel for one logger.
///
/// Constructed once per logger instance; there is no process-wide
/// dispatcher.
pub struct Dispatcher {
    sinks: RwLock<Vec<Arc<dyn Sink>>>,
    on_error: ErrorHandler,
    silent: bool,
}

impl Dispatcher {
    /// **Parameters**
    /// - `on_error`: replaces the default error handler entirely. The
    ///   default prints each delivery error to standard error.
    /// - `silent`: suppress all sink invocation while still accepting
    ///   records.
    pub fn new(on_error: Option<ErrorHandler>, silent: bool) -> Self {
        let on_error = on_error
            .unwrap_or_else(|| Arc::new(|err: DeliveryError| eprintln!("log delivery error: {}", err)));
        Dispatcher {
            sinks: RwLock::new(Vec::new()),
            on_error,
            silent,
        }
    }

    /// Append a sink; records dispatched from now on include it.
    pub fn add_sink(&self, sink: Arc<dyn Sink>) {
        self.sinks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(sink);
    }

    /// Remove every sink with the given name. Dispatches already in
    /// flight keep the snapshot they started with.
    pub fn remove_sink(&self, name: &str) {
        self.sinks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|sink| sink.name() != name);
    }

    pub fn sink_count(&self) -> usize {
        self.sinks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Hand one enriched record to every registered sink.
    ///
    /// Each delivery runs on its own task: completion order is
    /// unspecified, a failing or slow sink never blocks the caller or
    /// the other sinks, and failures surface only through the error
    /// channel. Must be called within a Tokio runtime.
    pub fn dispatch(&self, record: LogRecord) {
        if self.silent {
            return;
        }

        let snapshot: Vec<Arc<dyn Sink>> = self
            .sinks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        let record = Arc::new(record);
        for sink in snapshot {
            if let Some(min) = sink.min_level() {
                if !min.permits(record.level) {
                    continue;
                }
            }

            let record = Arc::clone(&record);
            let on_error = Arc::clone(&self.on_error);
            tokio::spawn(async move {
                if let Err(err) = sink.deliver(&record).await {
                    on_error(DeliveryError {
                        sink: sink.name().to_string(),
                        message: err.to_string(),
                    });
                }
            });
        }
    }
}
