use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::level::Level;

pub(crate) const LEVEL_KEY: &str = "level";
pub(crate) const MESSAGE_KEY: &str = "message";
pub(crate) const TIMESTAMP_KEY: &str = "timestamp";
pub(crate) const SERVICE_NAME_KEY: &str = "service_name";

/// Canonical record every call shape is normalized into.
///
/// Serialization order is stable: the named slots in declaration order,
/// then `fields` in key order.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub level: Level,
    /// A string once enrichment has run; may briefly hold a structured
    /// object between normalization and the disassembly stage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Value>,
    /// Assigned exactly once, by the enrichment chain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
    /// Canonical textual form attached by the last enrichment stage.
    /// Excluded from serialization so the cached text never nests itself.
    #[serde(skip)]
    pub serialized: Option<String>,
}

impl LogRecord {
    pub fn new(level: Level) -> Self {
        LogRecord {
            level,
            message: None,
            timestamp: None,
            service_name: None,
            fields: BTreeMap::new(),
            serialized: None,
        }
    }

    /// The message as text, when present and already a string.
    pub fn message_text(&self) -> Option<&str> {
        self.message.as_ref().and_then(Value::as_str)
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}
