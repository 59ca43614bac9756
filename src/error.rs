/// Errors surfaced by the generator.
///
/// Every variant is fatal for a run: nothing in the crate retries or
/// recovers from them.
#[derive(thiserror::Error, Debug)]
pub enum GeneratorError {
    /// A message could not be encoded, or a record's raw message is not JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A scenario was started without any configured logger.
    #[error("no loggers configured")]
    NoLoggers,

    #[error("invalid endpoint address: {0:?}")]
    InvalidEndpoint(String),
}
