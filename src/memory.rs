use crate::level::Level;
use crate::record::LogRecord;
use crate::sink::Sink;
use async_trait::async_trait;
use std::error::Error;
use std::sync::{Arc, Mutex, PoisonError};

/// Sink that keeps every delivered record in memory.
///
/// Clones share the same buffer, so a test can hold one handle and hand
/// another to the logger under test.
#[derive(Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<LogRecord>>>,
    min_level: Option<Level>,
}

impl MemorySink {
    pub fn new() -> Self {
        MemorySink::default()
    }

    /// Only retain records at least as severe as `level`.
    pub fn with_min_level(mut self, level: Level) -> Self {
        self.min_level = Some(level);
        self
    }

    /// Snapshot of everything delivered so far, in delivery order.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl Sink for MemorySink {
    fn name(&self) -> &str {
        "memory"
    }

    fn min_level(&self) -> Option<Level> {
        self.min_level
    }

    async fn deliver(&self, record: &LogRecord) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
        Ok(())
    }
}
