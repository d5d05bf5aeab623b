//! Relay Config

use std::time::Duration;

use clap::Args;

use academy_app::{
    relay::{EmailConfig, WebhookConfig, WebhookEncoding},
    secret::Secret,
};

/// Automation webhook and admin email settings.
#[derive(Debug, Args)]
pub struct RelayConfig {
    /// Automation webhook URL; forwarding is disabled when unset
    #[arg(long, env = "WEBHOOK_URL")]
    pub webhook_url: Option<String>,

    /// Webhook body encoding (json, form)
    #[arg(long, env = "WEBHOOK_ENCODING", default_value = "json")]
    pub webhook_encoding: WebhookEncoding,

    /// Webhook request timeout in seconds
    #[arg(long, env = "WEBHOOK_TIMEOUT_SECONDS", default_value_t = 10_u64)]
    pub webhook_timeout_seconds: u64,

    /// Email API endpoint
    #[arg(
        long,
        env = "EMAIL_API_URL",
        default_value = "https://api.resend.com/emails"
    )]
    pub email_api_url: String,

    /// Email API key; the admin email relay answers 503 when unset
    #[arg(long, env = "EMAIL_API_KEY", hide_env_values = true)]
    pub email_api_key: Option<String>,

    /// Email API request timeout in seconds
    #[arg(long, env = "EMAIL_TIMEOUT_SECONDS", default_value_t = 10_u64)]
    pub email_timeout_seconds: u64,

    /// Sender address for admin emails
    #[arg(
        long,
        env = "EMAIL_FROM",
        default_value = "Training Academy <noreply@example.com>"
    )]
    pub email_from: String,

    /// Recipient of quote and invoice request emails
    #[arg(long, env = "ADMIN_EMAIL", default_value = "admin@example.com")]
    pub admin_email: String,

    /// Dashboard link included in admin emails
    #[arg(
        long,
        env = "DASHBOARD_URL",
        default_value = "http://localhost:5173/admin/dashboard"
    )]
    pub dashboard_url: String,
}

impl RelayConfig {
    /// Webhook client settings.
    #[must_use]
    pub fn webhook(&self) -> WebhookConfig {
        WebhookConfig {
            url: self
                .webhook_url
                .clone()
                .filter(|url| !url.trim().is_empty()),
            encoding: self.webhook_encoding,
            timeout: Duration::from_secs(self.webhook_timeout_seconds),
        }
    }

    /// Email client settings.
    #[must_use]
    pub fn email(&self) -> EmailConfig {
        EmailConfig {
            api_url: self.email_api_url.clone(),
            api_key: self
                .email_api_key
                .as_deref()
                .filter(|key| !key.trim().is_empty())
                .map(Secret::new),
            from: self.email_from.clone(),
            admin_email: self.admin_email.clone(),
            dashboard_url: self.dashboard_url.clone(),
            timeout: Duration::from_secs(self.email_timeout_seconds),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        relay: RelayConfig,
    }

    #[test]
    fn blank_values_disable_relays() {
        let harness = Harness::parse_from([
            "academy-json",
            "--webhook-url",
            " ",
            "--email-api-key",
            "",
        ]);

        assert_eq!(harness.relay.webhook().url, None, "blank webhook url");
        assert!(harness.relay.email().api_key.is_none(), "blank email key");
    }

    #[test]
    fn encoding_and_timeout_are_parsed() {
        let harness = Harness::parse_from([
            "academy-json",
            "--webhook-url",
            "https://hooks.example.com/catch/1",
            "--webhook-encoding",
            "form",
            "--webhook-timeout-seconds",
            "3",
            "--email-timeout-seconds",
            "4",
        ]);

        let webhook = harness.relay.webhook();

        assert_eq!(webhook.encoding, WebhookEncoding::Form, "encoding");
        assert_eq!(webhook.timeout, Duration::from_secs(3), "timeout");
        assert_eq!(
            harness.relay.email().timeout,
            Duration::from_secs(4),
            "email timeout"
        );
        assert_eq!(
            webhook.url.as_deref(),
            Some("https://hooks.example.com/catch/1"),
            "url"
        );
    }
}
