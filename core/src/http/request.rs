//! HTTP/1.1 request value and its wire codec.

use base64ct::{Base64, Encoding};

use super::headers::{self, Headers};
use crate::error::CodecError;
use crate::log::Logger;

pub const HOST: &str = "Host";
pub const AUTHORIZATION: &str = "Authorization";

const MISSING_CREDENTIAL: &str = "request has neither a username nor a token; sending it unauthenticated";

/// How a request authenticates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Credential {
    #[default]
    None,
    /// A ready-made Basic token.
    Token(String),
    /// Username and password, turned into a Basic token at build time.
    Basic { username: String, password: String },
}

impl Credential {
    pub fn token(token: impl Into<String>) -> Self {
        Credential::Token(token.into())
    }

    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credential::Basic {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Base64 of `username:password`, as carried by `Authorization: Basic`.
pub fn basic_token(username: &str, password: &str) -> String {
    Base64::encode_string(format!("{username}:{password}").as_bytes())
}

/// The token a credential puts on the wire, or `None` when it carries
/// nothing usable. An empty token or an empty username counts as absent.
pub fn resolve_token(credential: &Credential) -> Option<String> {
    match credential {
        Credential::Token(token) if !token.is_empty() => Some(token.clone()),
        Credential::Basic { username, password } if !username.is_empty() => {
            Some(basic_token(username, password))
        }
        _ => None,
    }
}

/// An HTTP request described as plain data.
///
/// Built through [`HttpRequest::builder`] or decoded with
/// [`HttpRequest::from_bytes`]; immutable afterwards. `token` is resolved
/// once from `credential` and is empty when no credential was usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    method: String,
    host: String,
    path: String,
    headers: Headers,
    body: String,
    credential: Credential,
    token: String,
}

impl HttpRequest {
    pub fn builder(
        method: impl Into<String>,
        host: impl Into<String>,
        path: impl Into<String>,
    ) -> RequestBuilder {
        RequestBuilder {
            method: method.into(),
            host: host.into(),
            path: path.into(),
            headers: Headers::new(),
            body: String::new(),
            credential: Credential::None,
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Headers other than `Host` and `Authorization`.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Serialize to HTTP/1.1 wire bytes.
    ///
    /// `Host` comes first, then `Authorization: Basic` when a token is set,
    /// then the remaining headers in insertion order.
    pub fn to_bytes(&self) -> Vec<u8> {
        let start_line = format!("{} {} HTTP/1.1", self.method, self.path);
        let authorization = format!("Basic {}", self.token);
        let mut leading = vec![(HOST, self.host.as_str())];
        if !self.token.is_empty() {
            leading.push((AUTHORIZATION, authorization.as_str()));
        }
        headers::encode_message(&start_line, &leading, &self.headers, &self.body)
    }

    /// Parse wire bytes produced by [`HttpRequest::to_bytes`].
    ///
    /// `Host` and `Authorization` are lifted out of the header mapping and
    /// both must be present. Only the last space-separated word of
    /// `Authorization` is kept, whatever the scheme.
    pub fn from_bytes(data: &[u8]) -> Result<Self, CodecError> {
        let (start_line, lines) = headers::split_lines(data)?;
        let fields: Vec<&str> = start_line.split(' ').collect();
        let [method, path, _protocol] = fields.as_slice() else {
            return Err(CodecError::MalformedMessage(format!(
                "request line must be `METHOD PATH PROTOCOL`: {start_line:?}"
            )));
        };

        let (mut headers, body) = headers::parse_block(&lines)?;
        let authorization = headers
            .remove(AUTHORIZATION)
            .ok_or(CodecError::MissingHeader(AUTHORIZATION))?;
        let host = headers.remove(HOST).ok_or(CodecError::MissingHeader(HOST))?;
        let token = authorization.rsplit(' ').next().unwrap_or_default().to_string();

        Ok(HttpRequest {
            method: method.to_string(),
            host,
            path: path.to_string(),
            headers,
            body,
            credential: Credential::Token(token.clone()),
            token,
        })
    }
}

/// Collects the parts of an [`HttpRequest`].
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: String,
    host: String,
    path: String,
    headers: Headers,
    body: String,
    credential: Credential,
}

impl RequestBuilder {
    /// Add a header. `Host` and `Authorization` are ignored in any case:
    /// they come from the builder's host and credential.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        if !is_lifted(&name) {
            self.headers.insert(name, value);
        }
        self
    }

    pub fn headers<I, K, V>(self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        headers
            .into_iter()
            .fold(self, |builder, (name, value)| builder.header(name, value))
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn credential(mut self, credential: Credential) -> Self {
        self.credential = credential;
        self
    }

    /// Resolve the token and freeze the request. Warns through `logger`
    /// when the credential yields no token.
    pub fn build(self, logger: &dyn Logger) -> HttpRequest {
        let token = resolve_token(&self.credential).unwrap_or_else(|| {
            logger.warn(MISSING_CREDENTIAL);
            String::new()
        });
        HttpRequest {
            method: self.method,
            host: self.host,
            path: self.path,
            headers: self.headers,
            body: self.body,
            credential: self.credential,
            token,
        }
    }
}

fn is_lifted(name: &str) -> bool {
    name.eq_ignore_ascii_case(HOST) || name.eq_ignore_ascii_case(AUTHORIZATION)
}
