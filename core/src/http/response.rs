//! HTTP/1.1 response value and its wire codec.

use std::fmt;

use super::headers::{self, Headers};
use crate::error::CodecError;

/// An HTTP response described as plain data.
///
/// `status_code` is expected in 100–599 but only its numeric form is
/// checked on decode. `status_message` may contain spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status_code: u16,
    pub status_message: String,
    pub headers: Headers,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status_code: u16, status_message: impl Into<String>) -> Self {
        Self {
            status_code,
            status_message: status_message.into(),
            headers: Headers::new(),
            body: String::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let status_line = format!("HTTP/1.1 {} {}", self.status_code, self.status_message);
        headers::encode_message(&status_line, &[], &self.headers, &self.body)
    }

    /// Parse a response. The status line is split on its first two spaces
    /// only, so the reason phrase keeps any spaces it contains.
    pub fn from_bytes(data: &[u8]) -> Result<Self, CodecError> {
        let (status_line, lines) = headers::split_lines(data)?;
        let mut fields = status_line.splitn(3, ' ');
        let (Some(_protocol), Some(code), Some(reason)) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(CodecError::MalformedMessage(format!(
                "status line must be `PROTOCOL CODE MESSAGE`: {status_line:?}"
            )));
        };
        let status_code = code
            .parse::<u16>()
            .map_err(|_| CodecError::InvalidStatusCode(code.to_string()))?;

        let (headers, body) = headers::parse_block(&lines)?;
        Ok(HttpResponse {
            status_code,
            status_message: reason.to_string(),
            headers,
            body,
        })
    }
}

impl fmt::Display for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} headers={} body={}",
            self.status_code, self.status_message, self.headers, self.body
        )
    }
}
