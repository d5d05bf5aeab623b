//! Auth Config

use std::time::Duration;

use clap::Args;

use academy_app::{auth::HostedAuthConfig, secret::Secret};

/// Hosted auth service settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Hosted auth API base URL, e.g. `https://project.example.co/auth/v1`
    #[arg(long = "auth-url", env = "AUTH_URL")]
    pub url: String,

    /// Public API key sent with every auth request
    #[arg(long = "auth-api-key", env = "AUTH_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Auth request timeout in seconds
    #[arg(long, env = "AUTH_TIMEOUT_SECONDS", default_value_t = 10_u64)]
    pub auth_timeout_seconds: u64,
}

impl AuthConfig {
    /// Convert into the client configuration.
    #[must_use]
    pub fn to_client_config(&self) -> HostedAuthConfig {
        HostedAuthConfig {
            url: self.url.clone(),
            api_key: Secret::new(self.api_key.as_str()),
            timeout: Duration::from_secs(self.auth_timeout_seconds),
        }
    }
}
