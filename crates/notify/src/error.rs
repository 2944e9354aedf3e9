//! Error types for the notification handlers.

use thiserror::Error;

/// Errors that can occur while decoding or delivering a notification.
///
/// A missing webhook URL is not represented here: configuration is checked
/// before any processing starts and short-circuits to a 400 response. A
/// non-200 webhook reply is a checked branch on [`crate::slack::WebhookReply`],
/// not an error.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Envelope or embedded message is structurally invalid
    #[error("failed to decode notification envelope: {0}")]
    Decode(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request failed before the webhook produced a response
    #[error("webhook request failed: {0}")]
    Http(#[from] reqwest::Error),
}
