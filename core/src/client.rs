//! Send-SMS client.
//!
//! # Design
//! `SmsClient` holds the gateway coordinates and an injected `Logger`, and
//! nothing else. Building the request (`build_send_sms`) and reading the
//! reply (`parse_send_sms`) never touch the network; `send_sms` glues them
//! around a single `Transport::round_trip`, so tests can swap the socket for
//! a canned reply.

use std::fmt;
use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::error::SmsError;
use crate::http::{Credential, HttpRequest, HttpResponse};
use crate::log::Logger;
use crate::transport::Transport;
use crate::types::SendSms;

pub const USER_AGENT: &str = concat!("sms-client/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct SmsClient {
    host: String,
    path: String,
    username: String,
    password: String,
    logger: Arc<dyn Logger>,
}

impl SmsClient {
    pub fn new(service: &ServiceConfig, logger: Arc<dyn Logger>) -> Self {
        Self {
            host: service.url.clone(),
            path: service.path.clone(),
            username: service.username.clone(),
            password: service.password.clone(),
            logger,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Build the authenticated `POST` carrying `sms` as its JSON body.
    pub fn build_send_sms(&self, sms: &SendSms) -> Result<HttpRequest, SmsError> {
        let body = serde_json::to_string(sms)?;
        Ok(HttpRequest::builder("POST", &self.host, &self.path)
            .header("Connection", "keep-alive")
            .header("Content-Type", "application/json")
            .header("User-Agent", USER_AGENT)
            .body(body)
            .credential(Credential::basic(&self.username, &self.password))
            .build(self.logger.as_ref()))
    }

    /// Decode the gateway's reply and log it.
    pub fn parse_send_sms(&self, raw: &[u8]) -> Result<HttpResponse, SmsError> {
        let response = HttpResponse::from_bytes(raw)?;
        self.logger.info(&format!("service response: {response}"));
        Ok(response)
    }

    /// One full round-trip; returns the [`reply_line`] of the response.
    pub fn send_sms<T>(&self, transport: &mut T, sms: &SendSms) -> Result<String, SmsError>
    where
        T: Transport + ?Sized,
    {
        let request = self.build_send_sms(sms)?;
        let raw = transport.round_trip(&self.host, &request.to_bytes())?;
        let response = self.parse_send_sms(&raw)?;
        Ok(reply_line(&response))
    }
}

impl fmt::Debug for SmsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmsClient")
            .field("host", &self.host)
            .field("path", &self.path)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// `"{status_code} {status_message} {body}"`, the line the CLI prints.
pub fn reply_line(response: &HttpResponse) -> String {
    format!(
        "{} {} {}",
        response.status_code, response.status_message, response.body
    )
}
