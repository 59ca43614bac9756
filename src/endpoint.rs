use crate::error::GeneratorError;
use std::fmt;

/// Network address of one GELF TCP input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Host name or IP literal, without brackets.
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    /// Build an endpoint from a node address and a port.
    ///
    /// Surrounding whitespace and the brackets of an IPv6 literal
    /// (`[::1]`) are removed from `host`.
    ///
    /// **Errors**
    /// - [`GeneratorError::InvalidEndpoint`] if the host is empty.
    pub fn new(host: &str, port: u16) -> Result<Self, GeneratorError> {
        let trimmed = host.trim();
        let host = trimmed
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .unwrap_or(trimmed);

        if host.is_empty() {
            return Err(GeneratorError::InvalidEndpoint(trimmed.to_string()));
        }
        Ok(Endpoint { host: host.to_string(), port })
    }
}

/// `host:port`, with IPv6 literals bracketed so the result can be handed
/// to `TcpStream::connect`.
impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}
