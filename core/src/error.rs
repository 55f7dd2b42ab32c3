//! Error types for the SMS client.
//!
//! # Design
//! Each layer owns its error enum: the codec (`CodecError`), the socket
//! adapter (`TransportError`) and the config loader (`ConfigError`).
//! `SmsError` aggregates them for callers that drive a full round-trip and
//! maps each kind onto a process exit code.

use std::io;

use thiserror::Error;

/// Failures while decoding an HTTP message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The start line or header block violates the message grammar.
    #[error("malformed message: {0}")]
    MalformedMessage(String),

    /// A header the request decoder needs (`Host`, `Authorization`) is absent.
    #[error("missing required header `{0}`")]
    MissingHeader(&'static str),

    /// The status line's code field is not a valid status code.
    #[error("invalid status code {0:?}")]
    InvalidStatusCode(String),
}

/// Failures in the blocking socket round-trip.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("failed to connect to {endpoint}: {source}")]
    Connect {
        endpoint: String,
        #[source]
        source: io::Error,
    },

    #[error("socket I/O failed: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level error for a send-SMS invocation.
#[derive(Debug, Error)]
pub enum SmsError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to serialize request body: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SmsError {
    /// Process exit status: 2 for undecodable replies, 1 for everything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            SmsError::Codec(_) => 2,
            SmsError::Transport(_) | SmsError::Config(_) | SmsError::Serialization(_) => 1,
        }
    }
}
