//! Mapping of [`LogRecord`]s onto [GELF 1.1] payloads.
//!
//! [GELF 1.1]: https://go2docs.graylog.org/current/getting_in_log_data/gelf.html

use crate::record::LogRecord;
use serde::Serialize;
use serde_json::{Map, Value};

pub const GELF_VERSION: &str = "1.1";

/// Extra fields that are never emitted as additional GELF fields.
///
/// `message` already travels as `short_message`; `id` would become the
/// reserved `_id`.
const SKIPPED_FIELDS: &[&str] = &["message", "id"];

#[derive(Debug, Serialize)]
pub struct GelfMessage {
    pub version: &'static str,
    pub host: String,
    pub short_message: String,
    pub timestamp: f64,
    pub level: u8,
    #[serde(flatten)]
    pub additional: Map<String, Value>,
}

impl GelfMessage {
    /// Build the GELF payload for `record`, reporting `host` as origin.
    pub fn from_record(record: &LogRecord, host: &str) -> Self {
        let mut additional = Map::new();
        additional.insert("_logger_name".to_string(), Value::from(record.logger.as_str()));
        if let Some(file) = &record.file {
            additional.insert("_file".to_string(), Value::from(file.as_str()));
        }
        if let Some(line) = record.line {
            additional.insert("_line".to_string(), Value::from(line));
        }
        if let Some(module_path) = &record.module_path {
            additional.insert("_function".to_string(), Value::from(module_path.as_str()));
        }
        additional.insert("_pid".to_string(), Value::from(std::process::id()));

        for (name, value) in &record.fields {
            // Underscore-prefixed fields are private to the record.
            if name.starts_with('_') || SKIPPED_FIELDS.contains(&name.as_str()) {
                continue;
            }
            additional.insert(format!("_{name}"), gelf_value(value));
        }

        GelfMessage {
            version: GELF_VERSION,
            host: host.to_string(),
            short_message: record.msg.clone(),
            timestamp: record.created.timestamp_micros() as f64 / 1_000_000.0,
            level: record.level.syslog_level(),
            additional,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

// GELF additional fields are strings or numbers only.
fn gelf_value(value: &Value) -> Value {
    match value {
        Value::String(_) | Value::Number(_) => value.clone(),
        other => Value::String(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Severity;
    use serde_json::json;

    fn sample_record() -> LogRecord {
        let mut record = LogRecord::new("generator0", Severity::Warning, "hello");
        record.file = Some("src/scenarios.rs".to_string());
        record.line = Some(42);
        record.module_path = Some("scenarios".to_string());
        record.set_field("message", json!("hello"));
        record.set_field("test_case", json!("test_simple"));
        record.set_field("ecs.version", json!("1.5"));
        record.set_field("count", json!(7));
        record
    }

    #[test]
    fn core_fields_follow_gelf() {
        let msg = GelfMessage::from_record(&sample_record(), "box-1");
        let encoded: Value = serde_json::from_slice(&msg.to_bytes().unwrap()).unwrap();

        assert_eq!(encoded["version"], json!("1.1"));
        assert_eq!(encoded["host"], json!("box-1"));
        assert_eq!(encoded["short_message"], json!("hello"));
        assert_eq!(encoded["level"], json!(4));
        assert!(encoded["timestamp"].as_f64().unwrap() > 0.0);
        assert!(encoded.get("full_message").is_none());
    }

    #[test]
    fn extra_fields_are_prefixed() {
        let msg = GelfMessage::from_record(&sample_record(), "box-1");

        assert_eq!(msg.additional["_test_case"], json!("test_simple"));
        assert_eq!(msg.additional["_ecs.version"], json!("1.5"));
        assert_eq!(msg.additional["_count"], json!(7));
        assert_eq!(msg.additional["_logger_name"], json!("generator0"));
        assert_eq!(msg.additional["_line"], json!(42));
        assert!(!msg.additional.contains_key("_message"));
    }

    #[test]
    fn reserved_id_is_skipped() {
        let mut record = sample_record();
        record.set_field("id", json!("abc"));
        let msg = GelfMessage::from_record(&record, "box-1");

        assert!(!msg.additional.contains_key("_id"));
    }

    #[test]
    fn underscore_fields_are_not_emitted() {
        let mut record = sample_record();
        record.set_field("_internal", json!("hidden"));
        let msg = GelfMessage::from_record(&record, "box-1");

        assert!(!msg.additional.contains_key("_internal"));
        assert!(!msg.additional.contains_key("__internal"));
        assert_eq!(msg.additional["_test_case"], json!("test_simple"));
    }

    #[test]
    fn non_scalar_values_are_stringified() {
        let mut record = sample_record();
        record.set_field("flag", json!(true));
        record.set_field("tags", json!(["a", "b"]));
        record.set_field("nothing", Value::Null);
        let msg = GelfMessage::from_record(&record, "box-1");

        assert_eq!(msg.additional["_flag"], json!("true"));
        assert_eq!(msg.additional["_tags"], json!("[\"a\",\"b\"]"));
        assert_eq!(msg.additional["_nothing"], json!("null"));
    }

    #[test]
    fn severities_map_to_syslog_levels() {
        for (severity, level) in [(Severity::Critical, 2), (Severity::Error, 3), (Severity::Warning, 4)] {
            let record = LogRecord::new("generator0", severity, "");
            assert_eq!(GelfMessage::from_record(&record, "h").level, level);
        }
    }
}
