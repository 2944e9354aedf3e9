//! Monitoring-alarm state-change extraction, classification, and message
//! building.

use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::Utc;
use serde_json::Value;

use crate::config::Config;
use crate::envelope::string_or;
use crate::slack::{Attachment, Field, SlackMessage, StatusStyle, GRAY, GREEN, RED};

/// Orange pair for the insufficient-data state. Distinct emoji from the
/// pipeline in-progress bucket.
const INSUFFICIENT: StatusStyle = StatusStyle {
    color: "#FFA500",
    emoji: "⚠️",
};

const ALARM_STYLE: StatusStyle = StatusStyle {
    color: RED.color,
    emoji: "🚨",
};

/// Alarm states are a closed enumerated set from the monitoring system, so
/// the lookup is exact-match, not case-normalized.
static STATE_STYLES: LazyLock<HashMap<&'static str, StatusStyle>> = LazyLock::new(|| {
    HashMap::from([
        ("ALARM", ALARM_STYLE),
        ("OK", GREEN),
        ("INSUFFICIENT_DATA", INSUFFICIENT),
    ])
});

/// Map an alarm state code to its presentation pair. Total: unmatched
/// states always resolve to gray/❓.
#[must_use]
pub fn classify_state(state: &str) -> StatusStyle {
    STATE_STYLES.get(state).copied().unwrap_or(GRAY)
}

/// A decoded alarm state transition with display defaults applied.
#[derive(Debug, Clone)]
pub struct AlarmEvent {
    pub alarm_name: String,
    pub alarm_description: String,
    pub new_state: String,
    pub old_state: String,
    pub reason: String,
    pub timestamp: String,
}

impl AlarmEvent {
    /// Extract alarm fields from a decoded message. The timestamp defaults
    /// to the current time when the source omitted it.
    #[must_use]
    pub fn from_message(message: &Value) -> Self {
        Self {
            alarm_name: string_or(message, "AlarmName", "Unknown Alarm"),
            alarm_description: string_or(message, "AlarmDescription", "No description"),
            new_state: string_or(message, "NewStateValue", "UNKNOWN"),
            old_state: string_or(message, "OldStateValue", "UNKNOWN"),
            reason: string_or(message, "NewStateReason", "No reason provided"),
            timestamp: string_or(message, "StateChangeTime", &Utc::now().to_rfc3339()),
        }
    }

    /// Presentation pair for the new state.
    #[must_use]
    pub fn style(&self) -> StatusStyle {
        classify_state(&self.new_state)
    }

    /// Title embedding the alarm name, prefixed with the classified emoji.
    #[must_use]
    pub fn title(&self) -> String {
        format!("{} CloudWatch Alarm: {}", self.style().emoji, self.alarm_name)
    }

    /// Build the outbound webhook message for this transition.
    #[must_use]
    pub fn to_slack(&self, config: &Config) -> SlackMessage {
        let style = self.style();

        SlackMessage {
            username: format!("{} Monitoring", config.project_name),
            icon_emoji: ":warning:".to_string(),
            attachments: vec![Attachment {
                color: style.color.to_string(),
                title: self.title(),
                title_link: None,
                fields: vec![
                    Field::short("Environment", config.environment.to_uppercase()),
                    Field::short("State Change", format!("{} → {}", self.old_state, self.new_state)),
                    Field::wide("Description", self.alarm_description.clone()),
                    Field::wide("Reason", self.reason.clone()),
                    Field::short("Timestamp", self.timestamp.clone()),
                ],
                actions: vec![],
                footer: format!("{} AWS Infrastructure", config.project_name),
                ts: Utc::now().timestamp(),
            }],
        }
    }
}
