//! Send-SMS client core over a hand-written HTTP/1.1 codec.
//!
//! # Overview
//! Builds one authenticated `POST` to an SMS gateway, ships it over a plain
//! TCP socket and decodes the reply. The HTTP layer is written by hand: no
//! HTTP client crate sits between the codec and the socket.
//!
//! # Design
//! - `http` is pure: `HttpRequest` / `HttpResponse` convert to and from wire
//!   bytes and share one header-block grammar.
//! - `transport` owns host parsing and the blocking round-trip behind the
//!   `Transport` trait.
//! - Diagnostics go through an injected `log::Logger`, never a global.
//! - `SmsClient` composes the pieces; configuration comes from `config`.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod log;
pub mod transport;
pub mod types;

pub use client::{reply_line, SmsClient};
pub use config::{Config, ServiceConfig};
pub use error::{CodecError, ConfigError, SmsError, TransportError};
pub use http::{Credential, Headers, HttpRequest, HttpResponse};
pub use log::{Logger, RecordingLogger, TracingLogger};
pub use transport::{parse_host, Endpoint, ReadMode, TcpTransport, Transport};
pub use types::SendSms;
