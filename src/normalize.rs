//! Call-shape resolution.
//!
//! Every way of invoking the façade is parsed up front into a tagged
//! union and converted into a single canonical [`LogRecord`]; downstream
//! stages never inspect argument types again.

use serde_json::{Map, Value};

use crate::level::Level;
use crate::record::{LogRecord, LEVEL_KEY, MESSAGE_KEY, SERVICE_NAME_KEY, TIMESTAMP_KEY};

/// Payload accepted by the leveled entry points.
#[derive(Debug, Clone)]
pub enum LogContent {
    /// A bare message string.
    Message(String),
    /// A message string with attached structured meta.
    MessageMeta(String, Map<String, Value>),
    /// Structured fields only, no message argument.
    Meta(Map<String, Value>),
}

/// A fully resolved invocation of the façade.
#[derive(Debug, Clone)]
pub enum CallShape {
    /// Level supplied as a typed argument.
    Leveled { level: Level, content: LogContent },
    /// A single object carrying its own `level` key.
    Record(Map<String, Value>),
}

/// Failure to resolve a call shape into a canonical record.
///
/// Returned synchronously from the logging call; nothing partial is
/// enriched or dispatched.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("unrecognized log level {0:?}")]
    UnknownLevel(String),

    #[error("record has no level field")]
    MissingLevel,

    #[error("record level must be a string")]
    LevelNotAString,
}

impl From<&str> for LogContent {
    fn from(message: &str) -> Self {
        LogContent::Message(message.to_string())
    }
}

impl From<String> for LogContent {
    fn from(message: String) -> Self {
        LogContent::Message(message)
    }
}

impl From<Map<String, Value>> for LogContent {
    fn from(meta: Map<String, Value>) -> Self {
        LogContent::Meta(meta)
    }
}

impl From<Value> for LogContent {
    fn from(value: Value) -> Self {
        match value {
            Value::String(message) => LogContent::Message(message),
            Value::Object(meta) => LogContent::Meta(meta),
            other => LogContent::Message(other.to_string()),
        }
    }
}

impl<S: Into<String>> From<(S, Value)> for LogContent {
    fn from((message, meta): (S, Value)) -> Self {
        LogContent::MessageMeta(message.into(), meta_object(meta))
    }
}

/// Coerce arbitrary meta into an object; scalars and arrays are carried
/// under a `"meta"` key so nothing is silently dropped.
pub(crate) fn meta_object(meta: Value) -> Map<String, Value> {
    match meta {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            map.insert("meta".to_string(), other);
            map
        }
    }
}

/// Resolve a call shape into one canonical record.
///
/// **Returns**
/// - `Ok(record)` with `level` and `message` settled and all remaining
///   meta in `fields`.
/// - `Err(..)` when a whole-record shape carries a missing, non-string
///   or unrecognized level.
pub fn normalize(shape: CallShape) -> Result<LogRecord, ValidationError> {
    match shape {
        CallShape::Leveled { level, content } => Ok(normalize_leveled(level, content)),
        CallShape::Record(map) => normalize_record(map),
    }
}

/// Resolve a leveled call. Infallible: the level is already typed.
pub fn normalize_leveled(level: Level, content: LogContent) -> LogRecord {
    let mut record = LogRecord::new(level);
    match content {
        LogContent::Message(message) => {
            record.message = Some(Value::String(message));
        }
        LogContent::MessageMeta(message, meta) => {
            // The explicit argument wins; a `message` key inside the
            // meta is dropped by the merge below, not concatenated.
            record.message = Some(Value::String(message));
            merge_meta(&mut record, meta);
        }
        LogContent::Meta(meta) => {
            merge_meta(&mut record, meta);
        }
    }
    record
}

fn normalize_record(mut map: Map<String, Value>) -> Result<LogRecord, ValidationError> {
    let level = match map.remove(LEVEL_KEY) {
        Some(Value::String(name)) => {
            Level::from_name(&name).ok_or(ValidationError::UnknownLevel(name))?
        }
        Some(_) => return Err(ValidationError::LevelNotAString),
        None => return Err(ValidationError::MissingLevel),
    };

    let mut record = LogRecord::new(level);
    merge_meta(&mut record, map);
    Ok(record)
}

/// Merge caller meta into a record without ever producing duplicate keys
/// in the serialized output.
///
/// - `message` fills the message slot only while it is still empty, so
///   an explicit message argument always wins.
/// - `level` and `timestamp` are owned by the pipeline and discarded.
/// - a string `service_name` is lifted into its slot; other value types
///   stay in `fields` and still count as caller-supplied.
pub(crate) fn merge_meta(record: &mut LogRecord, meta: Map<String, Value>) {
    for (key, value) in meta {
        match key.as_str() {
            MESSAGE_KEY => {
                if record.message.is_none() {
                    record.message = Some(value);
                }
            }
            LEVEL_KEY | TIMESTAMP_KEY => {}
            SERVICE_NAME_KEY => {
                if record.service_name.is_some() || record.fields.contains_key(SERVICE_NAME_KEY) {
                    continue;
                }
                match value {
                    Value::String(name) => record.service_name = Some(name),
                    other => {
                        record.fields.insert(SERVICE_NAME_KEY.to_string(), other);
                    }
                }
            }
            _ => {
                record.fields.insert(key, value);
            }
        }
    }
}
