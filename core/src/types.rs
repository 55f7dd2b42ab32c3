//! Wire DTOs for the SMS gateway.
//!
//! # Design
//! The request body is a flat JSON object with exactly `sender`,
//! `recipient` and `message`. The mock server defines its own copy of this
//! shape; the integration tests catch any drift between the two.

use serde::{Deserialize, Serialize};

/// Body of a send-SMS request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SendSms {
    pub sender: String,
    pub recipient: String,
    pub message: String,
}

impl SendSms {
    pub fn new(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_three_string_keys() {
        let sms = SendSms::new("123456789", "987654321", "Hello_World!");
        let json = serde_json::to_value(&sms).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"sender":"123456789","recipient":"987654321","message":"Hello_World!"})
        );
    }

    #[test]
    fn rejects_missing_recipient() {
        let result: Result<SendSms, _> =
            serde_json::from_str(r#"{"sender":"1","message":"hi"}"#);
        assert!(result.is_err());
    }
}
