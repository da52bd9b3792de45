//! Text parsers for config lines and the runtime's port table.
//!
//! Three patterns are involved: the `host:port` token searched for in each
//! config line, and the two halves of a port table line
//! (`5432/tcp -> 0.0.0.0:55432`).

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::MapPortsError;

/// Host made of `[A-Za-z0-9._-]`, a colon, then exactly four digits (any
/// Unicode decimal digit). Unanchored: `db:54321` matches `db:5432`.
static HOST_PORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z0-9._-]+):(\d{4})").expect("valid regex"));

/// Left side of a port table line: `<port>/<proto>`.
static INTERNAL_PORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)/([A-Za-z0-9]+)$").expect("valid regex"));

/// Right side of a port table line: `<bind-address>:<port>`, split at the last colon.
static EXTERNAL_PORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*):([0-9]+)$").expect("valid regex"));

const MAPPING_SEPARATOR: &str = " -> ";

/// A `host:port` token found in a config line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPort {
    pub host: String,
    /// The four digits as written, leading zeros included.
    pub port: String,
    /// Byte range of the whole `host:port` text within the line.
    pub span: Range<usize>,
}

/// One entry of a container's port table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortMapping {
    pub internal_port: u16,
    pub protocol: String,
    pub bind_address: String,
    pub external_port: u16,
}

impl PortMapping {
    /// True when the internal port, written out in decimal, is exactly
    /// `digits`. `0080` therefore does not match port 80.
    pub fn publishes(&self, digits: &str) -> bool {
        self.internal_port.to_string() == digits
    }
}

/// Find the first `host:port` token in `line`.
///
/// Only the first match counts; anything after it on the line is ignored.
pub fn find_host_port(line: &str) -> Option<HostPort> {
    let caps = HOST_PORT_RE.captures(line)?;
    let whole = caps.get(0)?;
    Some(HostPort {
        host: caps.get(1)?.as_str().to_string(),
        port: caps.get(2)?.as_str().to_string(),
        span: whole.range(),
    })
}

/// True when `host` is one of the configured loopback aliases.
pub fn is_loopback_host<S: AsRef<str>>(host: &str, aliases: &[S]) -> bool {
    aliases.iter().any(|alias| alias.as_ref() == host)
}

/// Parse one port table line, e.g. `5432/tcp -> 0.0.0.0:55432`.
///
/// IPv6 bind addresses (`[::]:55432`) are handled by splitting at the last
/// colon. Any other shape is `MalformedRuntimeOutput`.
pub fn parse_port_mapping_line(line: &str) -> crate::Result<PortMapping> {
    let malformed = |reason: &str| {
        MapPortsError::MalformedRuntimeOutput(line.to_string(), reason.to_string())
    };

    let trimmed = line.trim();
    let (source, dest) = trimmed
        .split_once(MAPPING_SEPARATOR)
        .ok_or_else(|| malformed("missing ' -> ' separator"))?;
    if dest.contains(MAPPING_SEPARATOR) {
        return Err(malformed("more than one ' -> ' separator"));
    }

    let source_caps = INTERNAL_PORT_RE
        .captures(source.trim())
        .ok_or_else(|| malformed("expected '<port>/<proto>' before ' -> '"))?;
    let dest_caps = EXTERNAL_PORT_RE
        .captures(dest.trim())
        .ok_or_else(|| malformed("expected '<address>:<port>' after ' -> '"))?;

    let internal_port = source_caps[1]
        .parse()
        .map_err(|_| malformed("internal port out of range"))?;
    let external_port = dest_caps[2]
        .parse()
        .map_err(|_| malformed("external port out of range"))?;

    Ok(PortMapping {
        internal_port,
        protocol: source_caps[2].to_string(),
        bind_address: dest_caps[1].to_string(),
        external_port,
    })
}

/// Parse a whole port table, one mapping per non-blank line.
///
/// The first malformed line fails the entire table.
pub fn parse_port_table(output: &str) -> crate::Result<Vec<PortMapping>> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_port_mapping_line)
        .collect()
}
