//! Slack notification handlers for NovaCore Vectra operational events.
//!
//! This crate formats and forwards CI/CD pipeline events and monitoring
//! alarm state changes to a Slack incoming webhook. Two independent,
//! structurally identical handlers share one pipeline: decode the delivery
//! envelope, extract fields with display defaults, classify the status into
//! a color/emoji pair, build the webhook message, POST it, and map the
//! result to a structured response.
//!
//! # Usage
//!
//! ```no_run
//! use vectra_notify::{handle_pipeline, Config, WebhookClient};
//!
//! # async fn run(raw_envelope: &str) {
//! let config = Config::from_env();
//! let client = WebhookClient::new();
//!
//! let response = handle_pipeline(&config, &client, raw_envelope).await;
//! assert_eq!(response.status_code, 200);
//! # }
//! ```
//!
//! # Configuration
//!
//! Read from the process environment at invocation start:
//!
//! - `SLACK_WEBHOOK_URL`: the webhook endpoint (required; missing URL
//!   short-circuits every invocation to a 400 response)
//! - `PROJECT_NAME`: project display name (default "NovaCore Vectra")
//! - `ENVIRONMENT`: deployment environment label (default "unknown")
//!
//! The handlers never raise outward: every decode, build, or delivery
//! failure is caught at the invocation boundary and converted into a
//! [`HandlerResponse`].

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod alarm;
pub mod config;
pub mod envelope;
pub mod error;
pub mod handler;
pub mod pipeline;
pub mod slack;

pub use alarm::AlarmEvent;
pub use config::Config;
pub use envelope::Envelope;
pub use error::NotifyError;
pub use handler::{handle_alarm, handle_pipeline, HandlerResponse};
pub use pipeline::PipelineEvent;
pub use slack::{SlackMessage, StatusStyle, WebhookClient, WebhookReply};
