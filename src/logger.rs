use crate::error::GeneratorError;
use crate::filter::RecordFilter;
use crate::record::{LogRecord, Severity};
use crate::sink::LogSink;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Named logger that runs its filters on every record and hands the
/// surviving records to its sinks.
///
/// Emission is sequential: each sink is awaited before the next one is
/// tried and before the call returns.
pub struct Logger {
    name: String,
    filters: Vec<Box<dyn RecordFilter>>,
    sinks: Vec<Arc<dyn LogSink>>,
}

impl Logger {
    pub fn new(name: impl Into<String>) -> Self {
        Logger {
            name: name.into(),
            filters: Vec::new(),
            sinks: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_filter(&mut self, filter: impl RecordFilter + 'static) {
        self.filters.push(Box::new(filter));
    }

    pub fn add_sink(&mut self, sink: Arc<dyn LogSink>) {
        self.sinks.push(sink);
    }

    /// Emit `msg` at `severity`.
    ///
    /// The record's `file`, `line` and `module_path` point at the caller.
    ///
    /// **Returns**
    /// - `Ok(())` once every sink was tried (sink failures are only
    ///   reported through `tracing`).
    /// - `Err(..)` if a filter failed; nothing is sent in that case.
    #[track_caller]
    pub fn log(
        &self,
        severity: Severity,
        msg: impl Into<String>,
    ) -> impl std::future::Future<Output = Result<(), GeneratorError>> + '_ {
        let location = Location::caller();
        let mut record = LogRecord::new(self.name.clone(), severity, msg);
        record.file = Some(location.file().to_string());
        record.line = Some(location.line());
        record.module_path = Some(module_of(location.file()));
        self.handle(record)
    }

    #[track_caller]
    pub fn critical(
        &self,
        msg: impl Into<String>,
    ) -> impl std::future::Future<Output = Result<(), GeneratorError>> + '_ {
        self.log(Severity::Critical, msg)
    }

    #[track_caller]
    pub fn warning(
        &self,
        msg: impl Into<String>,
    ) -> impl std::future::Future<Output = Result<(), GeneratorError>> + '_ {
        self.log(Severity::Warning, msg)
    }

    #[track_caller]
    pub fn error(
        &self,
        msg: impl Into<String>,
    ) -> impl std::future::Future<Output = Result<(), GeneratorError>> + '_ {
        self.log(Severity::Error, msg)
    }

    async fn handle(&self, mut record: LogRecord) -> Result<(), GeneratorError> {
        for filter in &self.filters {
            if !filter.filter(&mut record)? {
                tracing::debug!(logger = %self.name, "record dropped by filter");
                return Ok(());
            }
        }

        for sink in &self.sinks {
            if let Err(e) = sink.send(&record).await {
                tracing::warn!(logger = %self.name, error = %e, "failed to send log record");
            }
        }
        Ok(())
    }

    /// Flush every sink, reporting failures the same way `send` does.
    pub async fn flush(&self) {
        for sink in &self.sinks {
            if let Err(e) = sink.flush().await {
                tracing::warn!(logger = %self.name, error = %e, "failed to flush log sink");
            }
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("filters", &self.filters.len())
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

// `Location` carries no module path; derive a readable one from the file.
fn module_of(file: &str) -> String {
    let stem = file
        .trim_end_matches(".rs")
        .trim_start_matches("src/")
        .trim_end_matches("/mod");
    stem.replace(['/', '\\'], "::")
}
