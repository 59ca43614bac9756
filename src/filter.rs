use crate::error::GeneratorError;
use crate::flatten::flatten;
use crate::record::{local_iso_timestamp, LogRecord};
use serde_json::Value;

/// ECS version advertised on every enriched record.
pub const ECS_VERSION: &str = "1.5";

/// Message key that is renamed after the logger.
pub const CUSTOM_KEY: &str = "custom";

/// Hook run by a [`Logger`](crate::logger::Logger) on every record
/// before it reaches the sinks.
pub trait RecordFilter: Send + Sync {
    /// Inspect or rewrite `record` in place.
    ///
    /// **Returns**
    /// - `Ok(true)` to let the record through.
    /// - `Ok(false)` to drop it.
    /// - `Err(..)` if the record could not be processed at all.
    fn filter(&self, record: &mut LogRecord) -> Result<bool, GeneratorError>;
}

/// Turns a JSON message into flat ECS-style fields on the record.
///
/// The record's raw message must be a JSON document. Its keys become
/// record fields (nested keys dot-joined), a `custom` key is renamed
/// after the logger, `message` becomes the display text and the fixed
/// fields `ecs.version`, `timestamp` and `log.logger` are attached.
#[derive(Debug, Clone)]
pub struct ContextFilter {
    logger_name: String,
    ecs_version: String,
}

impl ContextFilter {
    pub fn new(logger_name: impl Into<String>) -> Self {
        ContextFilter {
            logger_name: logger_name.into(),
            ecs_version: ECS_VERSION.to_string(),
        }
    }
}

impl RecordFilter for ContextFilter {
    fn filter(&self, record: &mut LogRecord) -> Result<bool, GeneratorError> {
        let mut message: Value = serde_json::from_str(&record.msg)?;

        if let Value::Object(map) = &mut message {
            if let Some(custom) = map.shift_remove(CUSTOM_KEY) {
                map.insert(self.logger_name.to_lowercase(), custom);
            }
        }

        let mut flat = flatten(&message);

        // Fields the record already has keep their value.
        for (field, contents) in &flat {
            record.set_field_if_absent(field.replace(' ', "_"), contents.clone());
        }

        record.msg = match flat.shift_remove("message") {
            Some(Value::String(text)) => text,
            Some(other) => other.to_string(),
            None => String::new(),
        };

        record.set_field("ecs.version", Value::String(self.ecs_version.clone()));
        record.set_field("timestamp", Value::String(local_iso_timestamp()));
        record.set_field("log.logger", Value::String(self.logger_name.clone()));

        Ok(true)
    }
}
