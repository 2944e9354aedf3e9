//! Top-level invocation boundary.
//!
//! Each handler converts every outcome into a [`HandlerResponse`]: the
//! contract is that an invocation always returns a structured result and
//! never propagates an error or panic outward.

use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

use crate::alarm::AlarmEvent;
use crate::config::Config;
use crate::envelope::Envelope;
use crate::error::NotifyError;
use crate::pipeline::PipelineEvent;
use crate::slack::{WebhookClient, WebhookReply};

/// Structured invocation result. `body` is a JSON-encoded string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandlerResponse {
    pub status_code: u16,
    pub body: String,
}

impl HandlerResponse {
    fn with_text(status_code: u16, text: &str) -> Self {
        Self {
            status_code,
            body: Value::String(text.to_string()).to_string(),
        }
    }
}

/// Handle one pipeline event envelope.
///
/// Checks configuration before any parsing, then decodes, formats, and
/// delivers the notification, mapping the outcome per the response
/// contract: 200 on confirmed delivery, 400 on missing webhook URL, the
/// remote status on rejected delivery, 500 on any processing error.
pub async fn handle_pipeline(
    config: &Config,
    client: &WebhookClient,
    raw_envelope: &str,
) -> HandlerResponse {
    let Some(webhook_url) = config.webhook_url.as_deref() else {
        error!("SLACK_WEBHOOK_URL environment variable not set");
        return HandlerResponse::with_text(400, "Slack webhook URL not configured");
    };

    let outcome = async {
        let message = Envelope::from_json(raw_envelope)?.message_json()?;
        let event = PipelineEvent::from_message(&message);
        let reply = client.post(webhook_url, &event.to_slack(config)).await?;
        Ok::<_, NotifyError>((event, reply))
    }
    .await;

    match outcome {
        Ok((event, reply)) if reply.is_delivered() => {
            info!(
                event_type = %event.event_type,
                "successfully sent notification for pipeline event"
            );
            HandlerResponse::with_text(200, "Notification sent successfully")
        }
        Ok((event, reply)) => rejected(&format!("pipeline event {}", event.event_type), &reply),
        Err(e) => failed("pipeline event", &e),
    }
}

/// Handle one alarm state-change envelope.
///
/// Same boundary contract as [`handle_pipeline`].
pub async fn handle_alarm(
    config: &Config,
    client: &WebhookClient,
    raw_envelope: &str,
) -> HandlerResponse {
    let Some(webhook_url) = config.webhook_url.as_deref() else {
        error!("SLACK_WEBHOOK_URL environment variable not set");
        return HandlerResponse::with_text(400, "Slack webhook URL not configured");
    };

    let outcome = async {
        let message = Envelope::from_json(raw_envelope)?.message_json()?;
        let alarm = AlarmEvent::from_message(&message);
        let reply = client.post(webhook_url, &alarm.to_slack(config)).await?;
        Ok::<_, NotifyError>((alarm, reply))
    }
    .await;

    match outcome {
        Ok((alarm, reply)) if reply.is_delivered() => {
            info!(
                alarm_name = %alarm.alarm_name,
                "successfully sent notification for alarm"
            );
            HandlerResponse::with_text(200, "Notification sent successfully")
        }
        Ok((alarm, reply)) => rejected(&format!("alarm {}", alarm.alarm_name), &reply),
        Err(e) => failed("alarm", &e),
    }
}

/// Map a non-200 webhook reply, echoing the remote status and body.
fn rejected(context: &str, reply: &WebhookReply) -> HandlerResponse {
    error!(
        status = reply.status,
        context, "failed to send notification"
    );
    HandlerResponse::with_text(
        reply.status,
        &format!("Failed to send notification: {}", reply.body),
    )
}

/// Map a processing error to the generic 500 response.
fn failed(context: &str, err: &NotifyError) -> HandlerResponse {
    error!(error = %err, context, "error processing notification");
    HandlerResponse::with_text(500, &format!("Error: {err}"))
}
