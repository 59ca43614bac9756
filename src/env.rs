//! Environment variable names used by the generator, plus small helpers
//! to read them. Library types never read the environment themselves.

/// `tracing` filter directives for the generator's own diagnostics,
/// e.g. `debug` or `gelf_test_generator=trace`.
pub const GENERATOR_LOG_ENV: &str = "GENERATOR_LOG";

/// Host name reported in the GELF `host` field; the OS host name when unset.
pub const GENERATOR_HOSTNAME_ENV: &str = "GENERATOR_HOSTNAME";

/// Read an environment variable or fall back to a provided default.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read an environment variable, treating an empty value as unset.
pub fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Host name to report as the origin of every GELF message.
///
/// Tries [`GENERATOR_HOSTNAME_ENV`], then the OS host name, then falls
/// back to `"unknown"`.
pub fn local_hostname() -> String {
    if let Some(host) = env_non_empty(GENERATOR_HOSTNAME_ENV) {
        return host;
    }
    match hostname::get() {
        Ok(name) => match name.into_string() {
            Ok(name) if !name.is_empty() => name,
            _ => {
                tracing::warn!("system host name is empty or not UTF-8, using 'unknown'");
                "unknown".to_string()
            }
        },
        Err(e) => {
            tracing::warn!(error = %e, "could not determine host name, using 'unknown'");
            "unknown".to_string()
        }
    }
}
