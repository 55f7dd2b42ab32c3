//! HTTP/1.1 message codec.
//!
//! # Design
//! Requests and responses are plain values that convert to and from the
//! exact bytes sent over the socket. Messages are CRLF-framed: a start line,
//! `Name: value` header lines, a blank line, then the body verbatim. There is
//! no chunked encoding and no streaming; a body is whatever follows the blank
//! line.
//!
//! The codec is pure. The only side effect anywhere in this module is the
//! warning `RequestBuilder::build` sends to the injected `Logger` when a
//! request has no usable credential.

mod headers;
mod request;
mod response;

pub use headers::Headers;
pub use request::{
    basic_token, resolve_token, Credential, HttpRequest, RequestBuilder, AUTHORIZATION, HOST,
};
pub use response::HttpResponse;
