//! Ordered enrichment stages.
//!
//! Each stage is a total function from record to record; validation has
//! already happened in [`normalize`](crate::normalize) and no stage can
//! fail for a canonical record. The chain order is fixed: timestamp,
//! message disassembly, service tag, seal.

use chrono::Utc;
use serde_json::Value;

use crate::normalize::merge_meta;
use crate::record::{LogRecord, SERVICE_NAME_KEY};

/// Run the full chain in order.
pub fn enrich(record: LogRecord, service_name: Option<&str>) -> LogRecord {
    let record = stamp_timestamp(record);
    let record = flatten_structured_message(record);
    let record = tag_service(record, service_name);
    seal(record)
}

/// Assign the wall-clock timestamp. A timestamp already on the record is
/// never overwritten, so the stamp happens exactly once per record.
pub fn stamp_timestamp(mut record: LogRecord) -> LogRecord {
    if record.timestamp.is_none() {
        record.timestamp = Some(Utc::now());
    }
    record
}

/// Disassemble a structured message into top-level fields.
///
/// When the message slot resolved to an object rather than a string, its
/// contents merge into the record and the slot is cleared, so
/// structured-only entries emit no stray `message` key.
pub fn flatten_structured_message(mut record: LogRecord) -> LogRecord {
    match record.message.take() {
        Some(Value::Object(map)) => merge_meta(&mut record, map),
        other => record.message = other,
    }
    record
}

/// Inject the configured service name unless the caller already supplied
/// one in any form.
pub fn tag_service(mut record: LogRecord, service_name: Option<&str>) -> LogRecord {
    if record.service_name.is_none() && !record.fields.contains_key(SERVICE_NAME_KEY) {
        record.service_name = service_name.map(str::to_owned);
    }
    record
}

/// Serialize the complete record once and cache the text.
///
/// Sinks that render text must use this cached value, never
/// re-serialize, so the rendered output always matches the record as it
/// was sealed.
pub fn seal(mut record: LogRecord) -> LogRecord {
    let text = serde_json::to_string(&record).unwrap_or_else(|_| "{}".to_string());
    record.serialized = Some(text);
    record
}
