use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Names of the fields a [`LogRecord`] defines on its own.
///
/// Message content can never overwrite these.
pub const BUILTIN_FIELDS: &[&str] = &["level", "logger", "file", "line", "module_path", "created", "msg"];

/// Severity of an emitted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Error,
    Warning,
}

impl Severity {
    /// Map a severity label to a [`Severity`]. Anything other than
    /// `critical` or `warning` means [`Severity::Error`].
    pub fn from_label(label: &str) -> Self {
        match label {
            "critical" => Severity::Critical,
            "warning" => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }

    /// Syslog severity number, as used by GELF's `level`.
    pub fn syslog_level(&self) -> u8 {
        match self {
            Severity::Critical => 2,
            Severity::Error => 3,
            Severity::Warning => 4,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single log event on its way from a [`Logger`](crate::logger::Logger)
/// to its sinks.
///
/// The named struct fields are the record's built-in fields (see
/// [`BUILTIN_FIELDS`]); everything attached by filters lives in `fields`,
/// in the order it was set.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub created: DateTime<Utc>,
    pub level: Severity,
    pub logger: String,
    pub module_path: Option<String>,
    pub file: Option<String>,
    pub line: Option<u32>,
    /// Raw message as passed to the logger; replaced by the display text
    /// once a filter has processed it.
    pub msg: String,
    pub fields: Map<String, Value>,
}

impl LogRecord {
    pub fn new(logger: impl Into<String>, level: Severity, msg: impl Into<String>) -> Self {
        LogRecord {
            created: Utc::now(),
            level,
            logger: logger.into(),
            module_path: None,
            file: None,
            line: None,
            msg: msg.into(),
            fields: Map::new(),
        }
    }

    /// Whether `name` is a built-in field or an extra field already set.
    pub fn has_field(&self, name: &str) -> bool {
        BUILTIN_FIELDS.contains(&name) || self.fields.contains_key(name)
    }

    /// Set an extra field only if the record does not define it yet.
    ///
    /// Returns `true` if the value was stored.
    pub fn set_field_if_absent(&mut self, name: impl Into<String>, value: Value) -> bool {
        let name = name.into();
        if self.has_field(&name) {
            return false;
        }
        self.fields.insert(name, value);
        true
    }

    /// Set an extra field, replacing any previous extra value.
    pub fn set_field(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// Current local wall-clock time as ISO-8601 without a UTC offset,
/// e.g. `2024-05-01T13:37:00.123456`.
pub fn local_iso_timestamp() -> String {
    Local::now().naive_local().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_labels_map_to_error() {
        assert_eq!(Severity::from_label("critical"), Severity::Critical);
        assert_eq!(Severity::from_label("warning"), Severity::Warning);
        assert_eq!(Severity::from_label("error"), Severity::Error);
        assert_eq!(Severity::from_label("info"), Severity::Error);
        assert_eq!(Severity::from_label(""), Severity::Error);
    }

    #[test]
    fn builtin_fields_are_never_replaced() {
        let mut record = LogRecord::new("generator0", Severity::Warning, "{}");
        assert!(!record.set_field_if_absent("line", json!(99)));
        assert!(!record.set_field_if_absent("level", json!("debug")));
        assert!(record.field("line").is_none());
    }

    #[test]
    fn first_extra_value_wins() {
        let mut record = LogRecord::new("generator0", Severity::Warning, "{}");
        assert!(record.set_field_if_absent("x", json!("first")));
        assert!(!record.set_field_if_absent("x", json!("second")));
        assert_eq!(record.field("x"), Some(&json!("first")));
    }

    #[test]
    fn timestamp_has_no_offset() {
        let ts = local_iso_timestamp();
        assert!(chrono::NaiveDateTime::parse_from_str(&ts, "%Y-%m-%dT%H:%M:%S%.f").is_ok());
        assert!(!ts.ends_with('Z'));
        assert!(!ts.contains('+'));
    }
}
