use crate::error::GeneratorError;
use crate::logger::Logger;
use crate::record::Severity;
use serde::Serialize;

/// Encode `fields` as a JSON string and emit it through `logger` with the
/// severity named by `severity`.
///
/// `"critical"` and `"warning"` select those levels; any other label
/// emits at error level. Exactly one record is emitted per call.
///
/// **Errors**
/// - [`GeneratorError::Json`] if `fields` cannot be encoded; nothing is
///   emitted in that case.
/// - Any error raised by the logger's filters.
#[track_caller]
pub fn send_log_json<'a, T>(
    logger: &'a Logger,
    severity: &str,
    fields: &T,
) -> impl std::future::Future<Output = Result<(), GeneratorError>> + 'a
where
    T: Serialize + ?Sized,
{
    let severity = Severity::from_label(severity);
    // Encode eagerly so the returned future does not borrow `fields`.
    let emit = match serde_json::to_string(fields) {
        Ok(json) => Ok(logger.log(severity, json)),
        Err(e) => Err(e),
    };
    async move {
        match emit {
            Ok(emission) => emission.await,
            Err(e) => Err(GeneratorError::Json(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_sink::MemorySink;
    use serde::ser::{Error as _, Serializer};
    use serde_json::json;
    use std::sync::Arc;

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("not representable"))
        }
    }

    fn memory_logger() -> (Logger, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let mut logger = Logger::new("generator0");
        logger.add_sink(sink.clone());
        (logger, sink)
    }

    #[tokio::test]
    async fn severity_labels_select_level() {
        let (logger, sink) = memory_logger();
        for label in ["critical", "warning", "error", "info"] {
            send_log_json(&logger, label, &json!({"label": label})).await.unwrap();
        }

        let levels: Vec<Severity> = sink.records().iter().map(|r| r.level).collect();
        assert_eq!(
            levels,
            vec![Severity::Critical, Severity::Warning, Severity::Error, Severity::Error]
        );
    }

    #[tokio::test]
    async fn fields_are_sent_as_json_text() {
        let (logger, sink) = memory_logger();
        send_log_json(&logger, "warning", &json!({"a": {"b": 1}, "message": "hi"})).await.unwrap();

        let records = sink.records();
        let decoded: serde_json::Value = serde_json::from_str(&records[0].msg).unwrap();
        assert_eq!(decoded, json!({"a": {"b": 1}, "message": "hi"}));
    }

    #[tokio::test]
    async fn encoding_failure_emits_nothing() {
        let (logger, sink) = memory_logger();
        let result = send_log_json(&logger, "warning", &Unserializable).await;

        assert!(matches!(result, Err(GeneratorError::Json(_))));
        assert!(sink.is_empty());
    }
}
