//! TOML configuration for the SMS gateway.
//!
//! ```toml
//! [sms_service]
//! url = "http://localhost:4010"
//! username = "test_login_1"
//! password = "test_password_1"
//! path = "/send_sms"   # optional
//! ```

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_PATH: &str = "/send_sms";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub sms_service: ServiceConfig,
}

/// Target gateway and the account used to authenticate against it.
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct ServiceConfig {
    pub url: String,
    pub username: String,
    pub password: String,
    #[serde(default = "default_path")]
    pub path: String,
}

fn default_path() -> String {
    DEFAULT_PATH.to_string()
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("path", &self.path)
            .finish()
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }
}
