//! Read-only runtime configuration sourced from the process environment.

use tracing::warn;

/// Environment variable holding the Slack incoming-webhook URL.
const ENV_SLACK_WEBHOOK_URL: &str = "SLACK_WEBHOOK_URL";

/// Environment variable overriding the project display name.
const ENV_PROJECT_NAME: &str = "PROJECT_NAME";

/// Environment variable naming the deployment environment.
const ENV_ENVIRONMENT: &str = "ENVIRONMENT";

const DEFAULT_PROJECT_NAME: &str = "NovaCore Vectra";
const DEFAULT_ENVIRONMENT: &str = "unknown";

/// Handler configuration, read once at invocation start and never mutated.
#[derive(Debug, Clone)]
pub struct Config {
    /// Webhook endpoint. `None` short-circuits every handler to a 400
    /// response before any input is parsed.
    pub webhook_url: Option<String>,
    /// Project display name used in the bot username and attachment footer.
    pub project_name: String,
    /// Deployment environment label, displayed uppercased.
    pub environment: String,
}

impl Config {
    /// Create a configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let webhook_url = std::env::var(ENV_SLACK_WEBHOOK_URL)
            .ok()
            .filter(|v| !v.is_empty());

        if webhook_url.is_none() {
            warn!("SLACK_WEBHOOK_URL not set, notifications cannot be delivered");
        }

        Self {
            webhook_url,
            project_name: env_or(ENV_PROJECT_NAME, DEFAULT_PROJECT_NAME),
            environment: env_or(ENV_ENVIRONMENT, DEFAULT_ENVIRONMENT),
        }
    }

    /// Create a configuration directly, bypassing the environment.
    #[must_use]
    pub fn new(
        webhook_url: Option<String>,
        project_name: impl Into<String>,
        environment: impl Into<String>,
    ) -> Self {
        Self {
            webhook_url,
            project_name: project_name.into(),
            environment: environment.into(),
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}
