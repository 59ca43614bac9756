//! Fixed test scenarios.
//!
//! Every scenario emits a short, fixed sequence of warnings through the
//! first logger. Each message is a base template merged with one
//! scenario-specific key, so a collector can be checked for extracting
//! exactly the fields it was sent.

use crate::dispatch::send_log_json;
use crate::error::GeneratorError;
use crate::logger::Logger;
use crate::record::local_iso_timestamp;
use rand::Rng;
use serde_json::{json, Map, Value};
use std::fmt;

/// Value sent by every scenario in the `source` field.
pub const SOURCE: &str = "testcase_generator";

/// Inclusive upper bound of the random scenario keys.
pub const MAX_KEY: u64 = 1 << 32;

const SEVERITY: &str = "warning";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    Simple,
    KeyInt,
    KeyMulti,
    CollectDate,
}

impl Scenario {
    /// All scenarios, in the order a run executes them.
    pub const ALL: [Scenario; 4] = [
        Scenario::Simple,
        Scenario::KeyInt,
        Scenario::KeyMulti,
        Scenario::CollectDate,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Scenario::Simple => "simple",
            Scenario::KeyInt => "test_key_int",
            Scenario::KeyMulti => "test_key_multi",
            Scenario::CollectDate => "test_collect_date",
        }
    }

    /// Run this scenario against `loggers[0]`.
    ///
    /// **Errors**
    /// - [`GeneratorError::NoLoggers`] if `loggers` is empty.
    /// - Any error raised while emitting; the remaining messages of the
    ///   scenario are not sent.
    pub async fn run<R: Rng>(&self, loggers: &[Logger], rng: &mut R) -> Result<(), GeneratorError> {
        let logger = loggers.first().ok_or(GeneratorError::NoLoggers)?;
        match self {
            Scenario::Simple => simple(logger).await,
            Scenario::KeyInt => key_int(logger, rng).await,
            Scenario::KeyMulti => key_multi(logger, rng).await,
            Scenario::CollectDate => collect_date(logger, rng).await,
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Run every scenario in [`Scenario::ALL`] order, printing a progress line
/// to stdout before each one.
pub async fn run_all<R: Rng>(loggers: &[Logger], rng: &mut R) -> Result<(), GeneratorError> {
    for scenario in Scenario::ALL {
        println!("Running {scenario}");
        tracing::debug!(%scenario, "starting scenario");
        scenario.run(loggers, rng).await?;
    }
    Ok(())
}

/// `base` with `extra` in front; keys of `base` win on collision.
pub fn merged(extra: (&str, Value), base: &Map<String, Value>) -> Map<String, Value> {
    let mut out = Map::new();
    out.insert(extra.0.to_string(), extra.1);
    for (key, value) in base {
        out.insert(key.clone(), value.clone());
    }
    out
}

fn random_key<R: Rng>(rng: &mut R) -> u64 {
    rng.gen_range(1..=MAX_KEY)
}

fn template(name: &str, keys: Vec<(&str, Value)>, tail: Vec<(&str, Value)>) -> Map<String, Value> {
    let mut msg = Map::new();
    msg.insert("message".to_string(), json!(name));
    msg.insert("test_case".to_string(), json!(name));
    for (key, value) in keys.into_iter().chain([("source", json!(SOURCE))]).chain(tail) {
        msg.insert(key.to_string(), value);
    }
    msg
}

async fn send_pair(logger: &Logger, prefix: &str, msg: &Map<String, Value>) -> Result<(), GeneratorError> {
    send_log_json(logger, SEVERITY, &merged((&format!("{prefix}_a"), json!("a")), msg)).await?;
    send_log_json(logger, SEVERITY, &merged((&format!("{prefix}_b"), json!("b")), msg)).await
}

async fn simple(logger: &Logger) -> Result<(), GeneratorError> {
    let msg = template("test_simple", vec![("test_simple_key", json!("simple"))], vec![]);
    send_pair(logger, "test_simple", &msg).await
}

async fn key_int<R: Rng>(logger: &Logger, rng: &mut R) -> Result<(), GeneratorError> {
    let key = random_key(rng);
    let msg = template("test_key_int", vec![("test_key_int_key", json!(key))], vec![]);
    send_pair(logger, "test_key_int", &msg).await
}

async fn collect_date<R: Rng>(logger: &Logger, rng: &mut R) -> Result<(), GeneratorError> {
    let key = random_key(rng);
    let msg = template("test_collect_date", vec![("test_collect_date_key", json!(key))], vec![]);

    // Each message gets its own fresh timestamp.
    let first = merged(("test_collect_date_a", json!(local_iso_timestamp())), &msg);
    send_log_json(logger, SEVERITY, &first).await?;
    let second = merged(("test_collect_date_b", json!(local_iso_timestamp())), &msg);
    send_log_json(logger, SEVERITY, &second).await
}

/// Three variants sent twice each: both keys (to be collected), only
/// `key1`, only `key2`.
async fn key_multi<R: Rng>(logger: &Logger, rng: &mut R) -> Result<(), GeneratorError> {
    let key1 = random_key(rng);
    let key2 = random_key(rng);

    let variants = [
        (vec![("test_key_multi_key1", json!(key1)), ("test_key_multi_key2", json!(key2))], "True"),
        (vec![("test_key_multi_key1", json!(key1))], "False"),
        (vec![("test_key_multi_key2", json!(key2))], "False"),
    ];

    for (keys, collected) in variants {
        let msg = template("test_key_multi", keys, vec![("test_be_collected", json!(collected))]);
        send_pair(logger, "test_key_multi", &msg).await?;
    }
    Ok(())
}
