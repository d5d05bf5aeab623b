//! Server configuration module

use clap::Parser;

use academy_app::context::AppSettings;

use crate::config::{
    auth::AuthConfig,
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    relay::RelayConfig,
    server::ServerRuntimeConfig,
};

pub(crate) mod auth;
pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod relay;
pub(crate) mod server;

/// Academy JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "academy-json", about = "Training Academy JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Hosted auth settings.
    #[command(flatten)]
    pub auth: AuthConfig,

    /// Webhook and email relay settings.
    #[command(flatten)]
    pub relay: RelayConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Settings for the app's outbound HTTP clients.
    #[must_use]
    pub fn app_settings(&self) -> AppSettings {
        AppSettings {
            auth: self.auth.to_client_config(),
            webhook: self.relay.webhook(),
            email: self.relay.email(),
        }
    }
}
