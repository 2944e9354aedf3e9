//! Slack webhook payload types and the delivery client.

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::NotifyError;

/// Presentation pair derived from a status or alarm state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusStyle {
    /// Attachment sidebar color, `#RRGGBB`.
    pub color: &'static str,
    /// Emoji prefixed to the message title.
    pub emoji: &'static str,
}

pub(crate) const GREEN: StatusStyle = StatusStyle {
    color: "#00FF00",
    emoji: "✅",
};
pub(crate) const RED: StatusStyle = StatusStyle {
    color: "#FF0000",
    emoji: "❌",
};
pub(crate) const ORANGE: StatusStyle = StatusStyle {
    color: "#FFA500",
    emoji: "🔄",
};
/// Fallback for any status outside the known buckets.
pub(crate) const GRAY: StatusStyle = StatusStyle {
    color: "#808080",
    emoji: "❓",
};

// =============================================================================
// Webhook payload types
// =============================================================================

/// Top-level webhook message.
#[derive(Debug, Serialize)]
pub struct SlackMessage {
    pub username: String,
    pub icon_emoji: String,
    pub attachments: Vec<Attachment>,
}

/// Visual block carrying color, title, fields, and footer.
#[derive(Debug, Serialize)]
pub struct Attachment {
    pub color: String,
    pub title: String,
    /// Clickable title target. Absent links serialize as no key, never as
    /// an empty string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_link: Option<String>,
    pub fields: Vec<Field>,
    /// Never serialized as an empty list.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Action>,
    pub footer: String,
    pub ts: i64,
}

/// A labeled value inside an attachment.
#[derive(Debug, Serialize)]
pub struct Field {
    pub title: String,
    pub value: String,
    pub short: bool,
}

impl Field {
    /// A field rendered side by side with its neighbor.
    pub fn short(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            short: true,
        }
    }

    /// A full-width field.
    pub fn wide(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            short: false,
        }
    }
}

/// An interactive button attached to a message.
#[derive(Debug, Serialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: &'static str,
    pub url: String,
    pub style: &'static str,
}

impl Action {
    /// Primary button linking to the workflow run.
    #[must_use]
    pub fn view_workflow(url: String) -> Self {
        Self {
            kind: "button",
            text: "View Workflow",
            url,
            style: "primary",
        }
    }
}

// =============================================================================
// Delivery
// =============================================================================

/// Reply from the webhook endpoint.
#[derive(Debug)]
pub struct WebhookReply {
    pub status: u16,
    pub body: String,
}

impl WebhookReply {
    /// Delivery is confirmed by exactly HTTP 200; other 2xx codes count
    /// as failures.
    #[must_use]
    pub fn is_delivered(&self) -> bool {
        self.status == 200
    }
}

/// HTTP client for the Slack incoming webhook.
#[derive(Debug, Clone, Default)]
pub struct WebhookClient {
    client: reqwest::Client,
}

impl WebhookClient {
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// POST the message as JSON. Exactly one attempt, no retry, no timeout
    /// override beyond the client default.
    pub async fn post(
        &self,
        webhook_url: &str,
        message: &SlackMessage,
    ) -> Result<WebhookReply, NotifyError> {
        debug!(username = %message.username, "posting webhook message");

        let response = self.client.post(webhook_url).json(message).send().await?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        if status != 200 {
            warn!(status, body = %body, "webhook rejected message");
        }

        Ok(WebhookReply { status, body })
    }
}
