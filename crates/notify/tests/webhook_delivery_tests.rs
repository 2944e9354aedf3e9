//! Integration tests for the invocation boundary and webhook delivery.
//!
//! These tests run the full handler pipeline against a mock webhook
//! endpoint and verify the response contract: 200 on confirmed delivery,
//! 400 on missing configuration, the remote status on rejected delivery,
//! and 500 on decode failures.

use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vectra_notify::{handle_alarm, handle_pipeline, Config, WebhookClient};

/// Wrap an event message in a delivery envelope.
fn envelope(message: &Value) -> String {
    json!({
        "Records": [{
            "Sns": { "Message": message.to_string() }
        }]
    })
    .to_string()
}

fn config_for(server: &MockServer) -> Config {
    Config::new(
        Some(format!("{}/webhook", server.uri())),
        "NovaCore Vectra",
        "production",
    )
}

async fn webhook_server(status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhook"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(status))
        .mount(&server)
        .await;
    server
}

/// The single received request body, as JSON.
async fn posted_payload(server: &MockServer) -> Value {
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    requests[0].body_json().unwrap()
}

#[tokio::test]
async fn test_pipeline_delivery_confirmed() {
    let server = webhook_server(200).await;

    let raw = envelope(&json!({
        "event_type": "deployment_completed",
        "status": "success",
        "branch": "main",
        "commit_sha": "abcdef1234567890",
        "author": "jo",
    }));
    let response = handle_pipeline(&config_for(&server), &WebhookClient::new(), &raw).await;

    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, "\"Notification sent successfully\"");

    let payload = posted_payload(&server).await;
    assert_eq!(payload["username"], "NovaCore Vectra CI/CD");
    assert_eq!(payload["icon_emoji"], ":rocket:");
    assert_eq!(payload["attachments"][0]["title"], "✅ Deployment Completed");
    assert_eq!(payload["attachments"][0]["color"], "#00FF00");
}

#[tokio::test]
async fn test_rejected_delivery_echoes_remote_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("service unavailable"))
        .mount(&server)
        .await;

    let config = Config::new(Some(server.uri()), "NovaCore Vectra", "production");
    let raw = envelope(&json!({ "event_type": "build_completed", "status": "success" }));
    let response = handle_pipeline(&config, &WebhookClient::new(), &raw).await;

    assert_eq!(response.status_code, 503);
    assert_eq!(
        response.body,
        "\"Failed to send notification: service unavailable\""
    );
}

#[tokio::test]
async fn test_non_200_success_codes_are_failures() {
    let server = webhook_server(204).await;

    let raw = envelope(&json!({ "event_type": "build_completed", "status": "success" }));
    let response = handle_pipeline(&config_for(&server), &WebhookClient::new(), &raw).await;

    assert_eq!(response.status_code, 204);
    assert!(response.body.starts_with("\"Failed to send notification"));
}

#[tokio::test]
async fn test_missing_webhook_url_short_circuits_before_decoding() {
    let config = Config::new(None, "NovaCore Vectra", "production");

    // Malformed input must not matter: configuration is checked first.
    let response = handle_pipeline(&config, &WebhookClient::new(), "{not json").await;
    assert_eq!(response.status_code, 400);
    assert_eq!(response.body, "\"Slack webhook URL not configured\"");

    let response = handle_alarm(&config, &WebhookClient::new(), "{not json").await;
    assert_eq!(response.status_code, 400);
    assert_eq!(response.body, "\"Slack webhook URL not configured\"");
}

#[tokio::test]
async fn test_malformed_embedded_message_is_processing_error() {
    let server = webhook_server(200).await;

    let raw = json!({
        "Records": [{ "Sns": { "Message": "{not json" } }]
    })
    .to_string();
    let response = handle_pipeline(&config_for(&server), &WebhookClient::new(), &raw).await;

    assert_eq!(response.status_code, 500);
    assert!(response.body.starts_with("\"Error:"));
    assert!(response.body.contains("not valid JSON"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_envelope_without_records_is_processing_error() {
    let server = webhook_server(200).await;

    let response = handle_alarm(
        &config_for(&server),
        &WebhookClient::new(),
        r#"{"Records":[]}"#,
    )
    .await;

    assert_eq!(response.status_code, 500);
    assert!(response.body.contains("no records"));
}

#[tokio::test]
async fn test_unreachable_webhook_is_processing_error() {
    // Nothing listens on this port.
    let config = Config::new(
        Some("http://127.0.0.1:1/webhook".to_string()),
        "NovaCore Vectra",
        "production",
    );
    let raw = envelope(&json!({ "event_type": "build_completed", "status": "success" }));
    let response = handle_pipeline(&config, &WebhookClient::new(), &raw).await;

    assert_eq!(response.status_code, 500);
    assert!(response.body.starts_with("\"Error:"));
}

#[tokio::test]
async fn test_failed_deployment_carries_action_button() {
    let server = webhook_server(200).await;

    let raw = envelope(&json!({
        "event_type": "deployment_failed",
        "status": "failed",
        "workflow_url": "https://ci.example.com/run/42",
    }));
    let response = handle_pipeline(&config_for(&server), &WebhookClient::new(), &raw).await;
    assert_eq!(response.status_code, 200);

    let payload = posted_payload(&server).await;
    let attachment = &payload["attachments"][0];
    assert_eq!(attachment["title"], "❌ Deployment Failed");
    assert_eq!(attachment["title_link"], "https://ci.example.com/run/42");
    assert_eq!(attachment["actions"][0]["type"], "button");
    assert_eq!(attachment["actions"][0]["text"], "View Workflow");
    assert_eq!(attachment["actions"][0]["url"], "https://ci.example.com/run/42");
}

#[tokio::test]
async fn test_successful_event_omits_link_and_actions() {
    let server = webhook_server(200).await;

    let raw = envelope(&json!({ "event_type": "build_completed", "status": "success" }));
    handle_pipeline(&config_for(&server), &WebhookClient::new(), &raw).await;

    let payload = posted_payload(&server).await;
    let attachment = &payload["attachments"][0];
    assert!(attachment.get("title_link").is_none());
    assert!(attachment.get("actions").is_none());
}

#[tokio::test]
async fn test_alarm_recovery_end_to_end() {
    let server = webhook_server(200).await;

    let raw = envelope(&json!({
        "AlarmName": "cpu-high",
        "AlarmDescription": "CPU above 90%",
        "NewStateValue": "OK",
        "OldStateValue": "ALARM",
        "NewStateReason": "threshold crossed",
        "StateChangeTime": "2026-08-26T12:00:00Z",
    }));
    let response = handle_alarm(&config_for(&server), &WebhookClient::new(), &raw).await;

    assert_eq!(response.status_code, 200);

    let payload = posted_payload(&server).await;
    assert_eq!(payload["username"], "NovaCore Vectra Monitoring");

    let attachment = &payload["attachments"][0];
    assert_eq!(attachment["color"], "#00FF00");
    assert_eq!(attachment["title"], "✅ CloudWatch Alarm: cpu-high");
    assert_eq!(attachment["footer"], "NovaCore Vectra AWS Infrastructure");

    let fields = attachment["fields"].as_array().unwrap();
    let state_change = fields.iter().find(|f| f["title"] == "State Change").unwrap();
    assert_eq!(state_change["value"], "ALARM → OK");
    assert_eq!(state_change["short"], true);
}

#[tokio::test]
async fn test_unknown_alarm_state_is_delivered_as_unknown() {
    let server = webhook_server(200).await;

    let raw = envelope(&json!({
        "AlarmName": "weird",
        "NewStateValue": "PENDING",
        "OldStateValue": "OK",
    }));
    let response = handle_alarm(&config_for(&server), &WebhookClient::new(), &raw).await;
    assert_eq!(response.status_code, 200);

    let payload = posted_payload(&server).await;
    let attachment = &payload["attachments"][0];
    assert_eq!(attachment["color"], "#808080");
    assert_eq!(attachment["title"], "❓ CloudWatch Alarm: weird");
}
