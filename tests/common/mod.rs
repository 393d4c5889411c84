//! Shared sinks and helpers for the integration tests.
//!
//! Not every test binary uses every helper.
#![allow(dead_code)]

use async_trait::async_trait;
use std::error::Error;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log_fanout::dispatch::{DeliveryError, ErrorHandler};
use log_fanout::logger::{Logger, LoggerConfig};
use log_fanout::memory::MemorySink;
use log_fanout::record::LogRecord;
use log_fanout::sink::Sink;

/// Sink that fails every delivery with a fixed message.
pub struct FailingSink {
    pub attempts: Arc<AtomicUsize>,
}

impl FailingSink {
    pub fn new() -> Self {
        FailingSink {
            attempts: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl Sink for FailingSink {
    fn name(&self) -> &str {
        "failing"
    }

    async fn deliver(&self, _record: &LogRecord) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err("simulated sink outage".into())
    }
}

/// Error handler that counts every delivery error it sees.
pub fn counting_error_handler() -> (ErrorHandler, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&count);
    let handler: ErrorHandler = Arc::new(move |_err: DeliveryError| {
        seen.fetch_add(1, Ordering::SeqCst);
    });
    (handler, count)
}

/// Logger capturing into `memory`, with the console sink disabled.
pub fn capture_logger(memory: &MemorySink) -> Logger {
    Logger::new(LoggerConfig {
        sinks: vec![Arc::new(memory.clone())],
        use_default_console_sink: false,
        ..LoggerConfig::default()
    })
}

/// Poll `condition` until it holds or a second has passed.
pub async fn wait_for(condition: impl Fn() -> bool) -> bool {
    for _ in 0..200 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    condition()
}
