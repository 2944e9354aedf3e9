//! CI/CD pipeline event extraction, classification, and message building.

use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::Utc;
use serde_json::Value;

use crate::config::Config;
use crate::envelope::{optional_string, string_or};
use crate::slack::{Action, Attachment, Field, SlackMessage, StatusStyle, GRAY, GREEN, ORANGE, RED};

/// Maximum displayed commit message length before truncation.
const COMMIT_MESSAGE_LIMIT: usize = 100;

/// Displayed commit SHA length.
const SHORT_SHA_LEN: usize = 8;

/// Event types that get a "View Workflow" button appended.
const ACTIONABLE_EVENTS: [&str; 3] = ["deployment_failed", "build_failed", "security_scan_failed"];

/// Status buckets, compared against the lowercased status code.
static STATUS_STYLES: LazyLock<HashMap<&'static str, StatusStyle>> = LazyLock::new(|| {
    HashMap::from([
        ("success", GREEN),
        ("completed", GREEN),
        ("failure", RED),
        ("failed", RED),
        ("error", RED),
        ("started", ORANGE),
        ("running", ORANGE),
        ("in_progress", ORANGE),
    ])
});

/// Titles for the known pipeline event types. Unknown types fall back to a
/// generic title embedding the raw code.
static EVENT_TITLES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("deployment_started", "Deployment Started"),
        ("deployment_completed", "Deployment Completed"),
        ("deployment_failed", "Deployment Failed"),
        ("build_started", "Build Started"),
        ("build_completed", "Build Completed"),
        ("build_failed", "Build Failed"),
        ("security_scan_completed", "Security Scan Completed"),
        ("security_scan_failed", "Security Scan Failed"),
        ("health_check_passed", "Health Check Passed"),
        ("health_check_failed", "Health Check Failed"),
        ("rollback_started", "Rollback Started"),
        ("rollback_completed", "Rollback Completed"),
    ])
});

/// Map a pipeline status code to its presentation pair. Total: unmatched
/// statuses always resolve to gray/❓.
#[must_use]
pub fn classify_status(status: &str) -> StatusStyle {
    STATUS_STYLES
        .get(status.to_lowercase().as_str())
        .copied()
        .unwrap_or(GRAY)
}

/// A decoded pipeline lifecycle event with display defaults applied.
#[derive(Debug, Clone)]
pub struct PipelineEvent {
    pub event_type: String,
    pub status: String,
    pub branch: String,
    pub commit_sha: String,
    pub commit_message: String,
    pub author: String,
    pub workflow_url: Option<String>,
    pub deployment_version: Option<String>,
}

impl PipelineEvent {
    /// Extract event fields from a decoded message, substituting the named
    /// default for each field that is missing or empty.
    #[must_use]
    pub fn from_message(message: &Value) -> Self {
        Self {
            event_type: string_or(message, "event_type", "unknown"),
            status: string_or(message, "status", "unknown"),
            branch: string_or(message, "branch", "unknown"),
            commit_sha: string_or(message, "commit_sha", "unknown"),
            commit_message: string_or(message, "commit_message", "No commit message"),
            author: string_or(message, "author", "Unknown"),
            workflow_url: optional_string(message, "workflow_url"),
            deployment_version: optional_string(message, "deployment_version"),
        }
    }

    /// Presentation pair for this event's status.
    #[must_use]
    pub fn style(&self) -> StatusStyle {
        classify_status(&self.status)
    }

    /// Resolved title, prefixed with the classified emoji.
    #[must_use]
    pub fn title(&self) -> String {
        let emoji = self.style().emoji;
        match EVENT_TITLES.get(self.event_type.as_str()) {
            Some(title) => format!("{emoji} {title}"),
            None => format!("{emoji} Pipeline Event: {}", self.event_type),
        }
    }

    /// Whether this event type carries a "View Workflow" action button.
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        ACTIONABLE_EVENTS.contains(&self.event_type.as_str())
    }

    /// Build the outbound webhook message for this event.
    #[must_use]
    pub fn to_slack(&self, config: &Config) -> SlackMessage {
        let style = self.style();

        let mut fields = vec![
            Field::short("Environment", config.environment.to_uppercase()),
            Field::short("Status", self.status.to_uppercase()),
            Field::short("Branch", self.branch.clone()),
            Field::short("Commit", short_sha(&self.commit_sha)),
            Field::short("Author", self.author.clone()),
        ];

        if let Some(version) = &self.deployment_version {
            fields.push(Field::short("Version", version.clone()));
        }

        fields.push(Field::wide(
            "Commit Message",
            ellipsize(&self.commit_message, COMMIT_MESSAGE_LIMIT),
        ));

        let actions = if self.is_actionable() {
            vec![Action::view_workflow(
                self.workflow_url.clone().unwrap_or_default(),
            )]
        } else {
            vec![]
        };

        SlackMessage {
            username: format!("{} CI/CD", config.project_name),
            icon_emoji: ":rocket:".to_string(),
            attachments: vec![Attachment {
                color: style.color.to_string(),
                title: self.title(),
                title_link: self.workflow_url.clone(),
                fields,
                actions,
                footer: format!("{} Deployment Pipeline", config.project_name),
                ts: Utc::now().timestamp(),
            }],
        }
    }
}

/// First eight characters of a commit SHA, for display.
fn short_sha(sha: &str) -> String {
    sha.chars().take(SHORT_SHA_LEN).collect()
}

/// Truncate to `limit` characters, appending an ellipsis marker when the
/// input was longer.
fn ellipsize(text: &str, limit: usize) -> String {
    if text.chars().count() > limit {
        let truncated: String = text.chars().take(limit).collect();
        format!("{truncated}...")
    } else {
        text.to_string()
    }
}
