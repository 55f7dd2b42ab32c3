//! Blocking socket round-trip.
//!
//! # Design
//! One connect, one full write and one read per call; no pooling, no
//! timeouts, no retries. `ReadMode::Single` reproduces the fixed-size
//! single `read` the gateway client has always done and may return a
//! partial reply. `ReadMode::UntilComplete` keeps reading until the peer
//! closes or the head's `Content-Length` is satisfied. Neither mode changes
//! what the codec sees: a byte buffer.

use std::fmt;
use std::io::{self, Read, Write};
use std::net::TcpStream;

use tracing::debug;

use crate::error::TransportError;

pub const DEFAULT_PORT: u16 = 80;

/// Size of the single receive buffer, and of each chunk in
/// `ReadMode::UntilComplete`.
pub const RECV_BUFFER_SIZE: usize = 2048;

const HEAD_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Resolved connect target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/// Resolve a `[http://]hostname[:port]` string.
///
/// The `http://` scheme is stripped; any other scheme is rejected. Without
/// a port suffix the port is 80. IPv6 literals must be bracketed.
pub fn parse_host(host: &str) -> Result<Endpoint, TransportError> {
    let authority = match host.split_once("://") {
        Some(("http", rest)) => rest,
        Some((scheme, _)) => {
            return Err(TransportError::InvalidAddress(format!(
                "unsupported scheme `{scheme}` in {host:?}"
            )))
        }
        None => host,
    };
    let authority = authority.trim_end_matches('/');

    let (name, port) = match authority.strip_prefix('[') {
        Some(bracketed) => {
            let (name, tail) = bracketed.split_once(']').ok_or_else(|| {
                TransportError::InvalidAddress(format!("unterminated IPv6 literal in {host:?}"))
            })?;
            let port = match tail {
                "" => None,
                _ => Some(tail.strip_prefix(':').ok_or_else(|| {
                    TransportError::InvalidAddress(format!("unexpected {tail:?} after IPv6 literal in {host:?}"))
                })?),
            };
            (name, port)
        }
        None => match authority.rsplit_once(':') {
            Some((name, _)) if name.contains(':') => {
                return Err(TransportError::InvalidAddress(format!(
                    "IPv6 literal in {host:?} must be bracketed, e.g. `[::1]:80`"
                )))
            }
            Some((name, port)) => (name, Some(port)),
            None => (authority, None),
        },
    };

    let port = match port {
        Some(port) => port.parse::<u16>().map_err(|_| {
            TransportError::InvalidAddress(format!("invalid port {port:?} in {host:?}"))
        })?,
        None => DEFAULT_PORT,
    };
    if name.is_empty() {
        return Err(TransportError::InvalidAddress(format!("no hostname in {host:?}")));
    }
    Ok(Endpoint {
        host: name.to_string(),
        port,
    })
}

/// Sends one encoded request and returns the raw reply bytes.
pub trait Transport {
    fn round_trip(&mut self, host: &str, message: &[u8]) -> Result<Vec<u8>, TransportError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// One `read` call into a buffer of `capacity` bytes.
    Single { capacity: usize },
    /// Read until end of stream or until the body reaches `Content-Length`.
    UntilComplete,
}

impl Default for ReadMode {
    fn default() -> Self {
        ReadMode::Single {
            capacity: RECV_BUFFER_SIZE,
        }
    }
}

/// `Transport` over a fresh `TcpStream` per call.
#[derive(Debug, Clone, Default)]
pub struct TcpTransport {
    read_mode: ReadMode,
}

impl TcpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_read_mode(read_mode: ReadMode) -> Self {
        Self { read_mode }
    }
}

impl Transport for TcpTransport {
    fn round_trip(&mut self, host: &str, message: &[u8]) -> Result<Vec<u8>, TransportError> {
        let endpoint = parse_host(host)?;
        debug!(%endpoint, bytes = message.len(), "sending request");

        let mut stream = TcpStream::connect((endpoint.host.as_str(), endpoint.port)).map_err(|source| {
            TransportError::Connect {
                endpoint: endpoint.to_string(),
                source,
            }
        })?;
        stream.write_all(message)?;
        stream.flush()?;

        let reply = match self.read_mode {
            ReadMode::Single { capacity } => read_once(&mut stream, capacity)?,
            ReadMode::UntilComplete => read_until_complete(&mut stream)?,
        };
        debug!(%endpoint, bytes = reply.len(), "received reply");
        Ok(reply)
    }
}

fn read_once<R: Read>(reader: &mut R, capacity: usize) -> io::Result<Vec<u8>> {
    let mut buf = vec![0; capacity];
    let n = reader.read(&mut buf)?;
    buf.truncate(n);
    Ok(buf)
}

fn read_until_complete<R: Read>(reader: &mut R) -> io::Result<Vec<u8>> {
    let mut reply = Vec::new();
    let mut chunk = [0u8; RECV_BUFFER_SIZE];
    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        reply.extend_from_slice(&chunk[..n]);
        if is_complete(&reply) {
            break;
        }
    }
    Ok(reply)
}

/// Whether `reply` holds a full head and a body of its declared length.
/// Without `Content-Length` only end of stream completes a reply.
fn is_complete(reply: &[u8]) -> bool {
    let Some(head_end) = find_slice(reply, HEAD_TERMINATOR) else {
        return false;
    };
    match content_length(&reply[..head_end]) {
        Some(len) => reply.len() - (head_end + HEAD_TERMINATOR.len()) >= len,
        None => false,
    }
}

/// `Content-Length` from a raw head, matching the name case-insensitively.
fn content_length(head: &[u8]) -> Option<usize> {
    let head = std::str::from_utf8(head).ok()?;
    head.split("\r\n").skip(1).find_map(|line| {
        let (name, value) = line.split_once(':')?;
        if name.trim().eq_ignore_ascii_case("content-length") {
            value.trim().parse().ok()
        } else {
            None
        }
    })
}

/// Finds the first occurrence of a slice in another slice and returns its starting position.
fn find_slice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
