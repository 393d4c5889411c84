use crate::level::Level;
use crate::record::LogRecord;
use crate::sink::Sink;
use async_trait::async_trait;
use std::error::Error;

/// Sink that renders records to standard output.
///
/// Prints the `serialized` text attached by the enrichment chain, so the
/// console shows exactly what was sealed — even if another sink reads
/// individual fields for its own formatting.
#[derive(Debug, Clone, Default)]
pub struct ConsoleSink {
    min_level: Option<Level>,
}

impl ConsoleSink {
    pub fn new() -> Self {
        ConsoleSink::default()
    }

    /// Only render records at least as severe as `level`.
    pub fn with_min_level(mut self, level: Level) -> Self {
        self.min_level = Some(level);
        self
    }
}

#[async_trait]
impl Sink for ConsoleSink {
    fn name(&self) -> &str {
        "console"
    }

    fn min_level(&self) -> Option<Level> {
        self.min_level
    }

    async fn deliver(&self, record: &LogRecord) -> Result<(), Box<dyn Error + Send + Sync>> {
        match &record.serialized {
            Some(text) => {
                println!("{}", text);
                Ok(())
            }
            None => Err("record reached the console sink without its serialized form".into()),
        }
    }
}
