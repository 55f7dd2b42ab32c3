//! Ordered header mapping and the header-block grammar shared by both codecs.
//!
//! # Design
//! `HttpRequest` and `HttpResponse` differ only in their start line and in
//! which headers they promote to fields. Everything between the start line
//! and the body goes through `parse_block` / `encode_message`, so the two
//! codecs cannot drift apart on separator handling or body framing.

use std::fmt;

use crate::error::CodecError;

pub(crate) const CRLF: &str = "\r\n";
pub(crate) const CONTENT_LENGTH: &str = "Content-Length";
const SEPARATOR: &str = ": ";

/// Header mapping that keeps first-insertion order.
///
/// Names are compared exactly. Inserting a name that is already present
/// replaces its value without moving it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a header, returning the previous value if any.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_ignore_case(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n.eq_ignore_ascii_case(name))
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Headers
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

impl fmt::Display for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        f.write_str("}")
    }
}

/// Decode `data` as UTF-8 and split it into its start line and the lines
/// that follow.
pub(crate) fn split_lines(data: &[u8]) -> Result<(&str, Vec<&str>), CodecError> {
    let text = std::str::from_utf8(data)
        .map_err(|e| CodecError::MalformedMessage(format!("message is not valid UTF-8: {e}")))?;
    let mut lines = text.split(CRLF);
    // `split` always yields at least one item.
    let start_line = lines.next().unwrap_or_default();
    Ok((start_line, lines.collect()))
}

/// Parse the header block and body from the lines following the start line.
///
/// Header lines are consumed up to the first empty line; the body is every
/// line after it, rejoined with CRLF.
pub(crate) fn parse_block(lines: &[&str]) -> Result<(Headers, String), CodecError> {
    let mut headers = Headers::new();
    for (index, line) in lines.iter().enumerate() {
        if line.is_empty() {
            let body = lines[index + 1..].join(CRLF);
            return Ok((headers, body));
        }
        let (name, value) = line.split_once(SEPARATOR).ok_or_else(|| {
            CodecError::MalformedMessage(format!("header line without `: ` separator: {line:?}"))
        })?;
        headers.insert(name, value);
    }
    Err(CodecError::MalformedMessage(
        "no blank line terminates the header block".to_string(),
    ))
}

/// Serialize a message head and body.
///
/// `leading` headers are written before `headers`. A `Content-Length` line
/// is appended when the body is non-empty and `headers` carries none.
pub(crate) fn encode_message(
    start_line: &str,
    leading: &[(&str, &str)],
    headers: &Headers,
    body: &str,
) -> Vec<u8> {
    let mut out = String::with_capacity(start_line.len() + body.len() + 64 * (headers.len() + 2));
    out.push_str(start_line);
    out.push_str(CRLF);
    for (name, value) in leading.iter().copied().chain(headers.iter()) {
        push_line(&mut out, name, value);
    }
    if !body.is_empty() && !headers.contains_ignore_case(CONTENT_LENGTH) {
        push_line(&mut out, CONTENT_LENGTH, &body.len().to_string());
    }
    out.push_str(CRLF);
    out.push_str(body);
    out.into_bytes()
}

fn push_line(out: &mut String, name: &str, value: &str) {
    out.push_str(name);
    out.push_str(SEPARATOR);
    out.push_str(value);
    out.push_str(CRLF);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_in_place() {
        let mut headers = Headers::new();
        headers.insert("A", "1");
        headers.insert("B", "2");
        assert_eq!(headers.insert("A", "3"), Some("1".to_string()));
        let entries: Vec<_> = headers.iter().collect();
        assert_eq!(entries, vec![("A", "3"), ("B", "2")]);
    }

    #[test]
    fn remove_returns_value_and_keeps_order() {
        let mut headers: Headers = [("A", "1"), ("B", "2"), ("C", "3")].into_iter().collect();
        assert_eq!(headers.remove("B").as_deref(), Some("2"));
        assert_eq!(headers.remove("B"), None);
        let names: Vec<_> = headers.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let headers: Headers = [("Content-Type", "text/plain")].into_iter().collect();
        assert_eq!(headers.get("content-type"), None);
        assert!(headers.contains_ignore_case("content-type"));
    }

    #[test]
    fn parse_block_splits_on_first_separator_only() {
        let lines = ["X-Json: {\"a\": 1}", "", "body"];
        let (headers, body) = parse_block(&lines).unwrap();
        assert_eq!(headers.get("X-Json"), Some("{\"a\": 1}"));
        assert_eq!(body, "body");
    }

    #[test]
    fn parse_block_rejoins_multiline_body() {
        let lines = ["A: 1", "", "line one", "", "line three"];
        let (_, body) = parse_block(&lines).unwrap();
        assert_eq!(body, "line one\r\n\r\nline three");
    }

    #[test]
    fn parse_block_rejects_line_without_separator() {
        let err = parse_block(&["A:1", ""]).unwrap_err();
        assert!(matches!(err, CodecError::MalformedMessage(_)));
    }

    #[test]
    fn parse_block_requires_blank_line() {
        let err = parse_block(&["A: 1", "B: 2"]).unwrap_err();
        assert!(matches!(err, CodecError::MalformedMessage(_)));
    }

    #[test]
    fn split_lines_rejects_invalid_utf8() {
        let err = split_lines(b"HTTP/1.1 200 OK\r\n\xff\r\n\r\n").unwrap_err();
        assert!(matches!(err, CodecError::MalformedMessage(_)));
    }

    #[test]
    fn encode_counts_bytes_not_chars() {
        let bytes = encode_message("X", &[], &Headers::new(), "héllo");
        assert_eq!(bytes, "X\r\nContent-Length: 6\r\n\r\nhéllo".as_bytes());
    }

    #[test]
    fn encode_keeps_explicit_content_length() {
        let headers: Headers = [("content-length", "5")].into_iter().collect();
        let bytes = encode_message("X", &[], &headers, "hello");
        assert_eq!(bytes, b"X\r\ncontent-length: 5\r\n\r\nhello");
    }

    #[test]
    fn encode_without_headers_or_body() {
        let bytes = encode_message("X", &[], &Headers::new(), "");
        assert_eq!(bytes, b"X\r\n\r\n");
    }

    #[test]
    fn display_lists_headers_in_order() {
        let headers: Headers = [("A", "1"), ("B", "2")].into_iter().collect();
        assert_eq!(headers.to_string(), "{A: 1, B: 2}");
    }
}
