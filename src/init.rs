use crate::endpoint::Endpoint;
use crate::env::{env_or, local_hostname, GENERATOR_LOG_ENV};
use crate::filter::ContextFilter;
use crate::gelf_tcp::GelfTcpSink;
use crate::logger::Logger;
use crate::sink::LogSink;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

/// Prefix of every logger name; the endpoint index is appended.
pub const LOGGER_NAME_PREFIX: &str = "generator";

/// Install the global `tracing` subscriber for the generator's own
/// diagnostics.
///
/// Output goes to stderr so that it never mixes with the progress lines
/// on stdout. Directives come from [`GENERATOR_LOG_ENV`], `info` when
/// unset or invalid. Calling this twice is harmless; the second call is
/// ignored.
pub fn init_tracing() {
    let directives = env_or(GENERATOR_LOG_ENV, "info");
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let _ = Registry::default().with(filter).with(fmt_layer).try_init();
}

/// Name of the logger that ships to the endpoint at `index`.
pub fn logger_name(index: usize) -> String {
    format!("{LOGGER_NAME_PREFIX}{index}")
}

/// Build one logger per sink, named `generator0`, `generator1`, ... in
/// order, each carrying a [`ContextFilter`] built with its own name.
pub fn build_loggers_with_sinks(sinks: Vec<Arc<dyn LogSink>>) -> Vec<Logger> {
    sinks
        .into_iter()
        .enumerate()
        .map(|(index, sink)| {
            let name = logger_name(index);
            let mut logger = Logger::new(name.clone());
            logger.add_sink(sink);
            logger.add_filter(ContextFilter::new(name));
            logger
        })
        .collect()
}

/// Build the GELF TCP loggers for `endpoints`, in order.
pub fn build_loggers(endpoints: &[Endpoint]) -> Vec<Logger> {
    let host = local_hostname();
    let sinks = endpoints
        .iter()
        .map(|endpoint| {
            tracing::info!(%endpoint, "configuring GELF TCP sink");
            Arc::new(GelfTcpSink::new(endpoint.clone(), host.clone())) as Arc<dyn LogSink>
        })
        .collect();
    build_loggers_with_sinks(sinks)
}
