use crate::endpoint::Endpoint;
use crate::gelf::GelfMessage;
use crate::record::LogRecord;
use crate::sink::LogSink;
use async_trait::async_trait;
use std::error::Error;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::sync::Mutex;

/// GELF over TCP: one uncompressed JSON payload per record, terminated by
/// a null byte.
pub struct GelfTcpSink {
    endpoint: Endpoint,
    host: String,
    stream: Mutex<Option<TcpStream>>,
}

impl GelfTcpSink {
    /// Create a sink for `endpoint` that reports `host` as the origin of
    /// every message.
    ///
    /// No connection is made until the first record is sent.
    pub fn new(endpoint: Endpoint, host: impl Into<String>) -> Self {
        GelfTcpSink {
            endpoint,
            host: host.into(),
            stream: Mutex::new(None),
        }
    }

    /// Encode `record` into a framed GELF TCP frame.
    pub fn encode(&self, record: &LogRecord) -> Result<Vec<u8>, serde_json::Error> {
        let mut frame = GelfMessage::from_record(record, &self.host).to_bytes()?;
        frame.push(0);
        Ok(frame)
    }
}

#[async_trait]
impl LogSink for GelfTcpSink {
    async fn send(&self, record: &LogRecord) -> Result<(), Box<dyn Error + Send + Sync>> {
        let frame = self.encode(record)?;

        let mut guard = self.stream.lock().await;
        if guard.is_none() {
            tracing::debug!(endpoint = %self.endpoint, "connecting to GELF input");
            *guard = Some(TcpStream::connect(self.endpoint.to_string()).await?);
        }

        let Some(stream) = guard.as_mut() else {
            return Err("GELF connection unavailable".into());
        };
        if let Err(e) = stream.write_all(&frame).await {
            // Reconnect on the next record.
            *guard = None;
            return Err(format!("GELF write to {} failed: {}", self.endpoint, e).into());
        }
        Ok(())
    }

    async fn flush(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        if let Some(stream) = self.stream.lock().await.as_mut() {
            stream.flush().await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Severity;
    use serde_json::{json, Value};
    use tokio::io::AsyncReadExt;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn frames_are_null_terminated_json() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let sink = GelfTcpSink::new(Endpoint::new("127.0.0.1", port).unwrap(), "test-host");

        let mut first = LogRecord::new("generator0", Severity::Warning, "one");
        first.set_field("test_case", json!("a"));
        let second = LogRecord::new("generator0", Severity::Critical, "two");

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            socket.read_to_end(&mut buf).await.unwrap();
            buf
        });

        sink.send(&first).await.unwrap();
        sink.send(&second).await.unwrap();
        drop(sink);

        let buf = server.await.unwrap();
        let frames: Vec<&[u8]> = buf.split(|b| *b == 0).filter(|f| !f.is_empty()).collect();
        assert_eq!(frames.len(), 2);
        assert_eq!(*buf.last().unwrap(), 0);

        let one: Value = serde_json::from_slice(frames[0]).unwrap();
        let two: Value = serde_json::from_slice(frames[1]).unwrap();
        assert_eq!(one["short_message"], json!("one"));
        assert_eq!(one["_test_case"], json!("a"));
        assert_eq!(one["host"], json!("test-host"));
        assert_eq!(two["short_message"], json!("two"));
        assert_eq!(two["level"], json!(2));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_an_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let sink = GelfTcpSink::new(Endpoint::new("127.0.0.1", port).unwrap(), "test-host");
        let record = LogRecord::new("generator0", Severity::Error, "lost");

        assert!(sink.send(&record).await.is_err());
    }
}
