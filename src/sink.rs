use crate::record::LogRecord;
use async_trait::async_trait;
use std::error::Error;

/// Asynchronous destination for [`LogRecord`]s emitted by a
/// [`Logger`](crate::logger::Logger).
///
/// Implementations are responsible for transporting records to a concrete
/// endpoint (a GELF TCP input, an in-memory buffer, etc). The logger awaits
/// each `send` before moving on, so records reach a sink in emission order.
#[async_trait]
pub trait LogSink: Send + Sync {
    /// Send a single log record to the underlying endpoint.
    ///
    /// **Parameters**
    /// - `record`: record that already went through the logger's filters.
    ///
    /// **Returns**
    /// - `Ok(())` if the record was handed to the endpoint.
    /// - `Err(..)` if the endpoint failed (connection refused, write
    ///   error, encoding error, etc.). The logger reports the failure and
    ///   carries on; it never retries.
    async fn send(&self, record: &LogRecord) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Flush any buffered records, if the sink buffers.
    ///
    /// Default implementation is a no-op.
    async fn flush(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }
}
