//! Parsing of `host[:port]` endpoint strings.

use std::fmt;

/// A network service to probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Host name or address.
    pub host: String,
    /// TCP port.
    pub port: u16,
}

impl Endpoint {
    /// Parse `host` or `host:port`, splitting on the last colon.
    ///
    /// A missing, empty, non-numeric or out-of-range port becomes
    /// `default_port`; surrounding whitespace around the port is ignored.
    /// Returns `None` only when the host part is empty.
    pub fn parse(raw: &str, default_port: u16) -> Option<Self> {
        let (host, port) = match raw.rsplit_once(':') {
            Some((host, port)) => (host, parse_port(port).unwrap_or(default_port)),
            None => (raw, default_port),
        };

        if host.is_empty() {
            return None;
        }

        Some(Self {
            host: host.to_string(),
            port,
        })
    }
}

fn parse_port(raw: &str) -> Option<u16> {
    raw.trim().parse::<u16>().ok().filter(|port| *port != 0)
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
