//! SNS-style delivery envelope carrying one embedded JSON message.
//!
//! The notification topic wraps every event in an outer envelope whose
//! records each hold the actual event as a JSON-encoded string. Only the
//! first record is processed; the topic delivers one event per invocation.

use serde::Deserialize;
use serde_json::Value;

use crate::error::NotifyError;

/// Outer notification-delivery wrapper.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    #[serde(rename = "Records", default)]
    pub records: Vec<Record>,
}

/// One delivery record inside the envelope.
#[derive(Debug, Deserialize)]
pub struct Record {
    #[serde(rename = "Sns")]
    pub sns: SnsMessage,
}

/// The topic message holding the event as a JSON-encoded string.
#[derive(Debug, Deserialize)]
pub struct SnsMessage {
    #[serde(rename = "Message")]
    pub message: String,
}

impl Envelope {
    /// Parse the raw triggering payload into an envelope.
    pub fn from_json(raw: &str) -> Result<Self, NotifyError> {
        serde_json::from_str(raw).map_err(|e| NotifyError::Decode(format!("invalid envelope: {e}")))
    }

    /// Parse the first record's embedded message body as JSON.
    pub fn message_json(&self) -> Result<Value, NotifyError> {
        let record = self
            .records
            .first()
            .ok_or_else(|| NotifyError::Decode("envelope contains no records".to_string()))?;

        serde_json::from_str(&record.sns.message).map_err(|e| {
            NotifyError::Decode(format!("embedded message is not valid JSON: {e}"))
        })
    }
}

/// Fetch a string field from a decoded message, substituting `default` when
/// the key is missing, not a string, or an empty string.
pub(crate) fn string_or(message: &Value, key: &str, default: &str) -> String {
    match message.get(key).and_then(Value::as_str) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => default.to_string(),
    }
}

/// Fetch an optional string field; missing and empty both map to `None`.
pub(crate) fn optional_string(message: &Value, key: &str) -> Option<String> {
    message
        .get(key)
        .and_then(Value::as_str)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}
