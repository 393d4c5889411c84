use crate::level::Level;
use crate::record::LogRecord;
use async_trait::async_trait;
use std::error::Error;

/// Asynchronous destination for enriched [`LogRecord`]s.
///
/// Implementations transport records to a concrete backend (console,
/// HTTP collector, in-memory buffer, etc). The dispatcher calls
/// `deliver` from a spawned task and never awaits it on the caller's
/// thread.
#[async_trait]
pub trait Sink: Send + Sync {
    /// Short stable name identifying this sink in delivery diagnostics.
    fn name(&self) -> &str;

    /// Minimum severity this sink accepts, applied on top of the
    /// logger-wide threshold but scoped to this sink only. `None`
    /// accepts every record.
    fn min_level(&self) -> Option<Level> {
        None
    }

    /// Deliver a single enriched record.
    ///
    /// **Parameters**
    /// - `record`: fully-enriched [`LogRecord`]; its `serialized` text
    ///   is already attached.
    ///
    /// **Returns**
    /// - `Ok(())` if the record was accepted by the backend.
    /// - `Err(..)` if delivery failed (network error, HTTP status,
    ///   closed stream, etc). The dispatcher reports the failure on the
    ///   error channel and performs no retries; retry policy, if any,
    ///   belongs to the sink itself.
    async fn deliver(&self, record: &LogRecord) -> Result<(), Box<dyn Error + Send + Sync>>;
}
