//! App Context

use std::sync::Arc;

use sqlx::migrate::MigrateError;
use thiserror::Error;

use crate::{
    auth::{AuthService, HostedAuthClient, HostedAuthConfig, HostedAuthError, PgAuthService},
    database::{self, Db},
    domain::{
        analytics::{AnalyticsService, RegistrationsAnalyticsService},
        audit::{AuditLog, PgAuditLog},
        courses::{CoursesService, PgCoursesService},
        registrations::{PgRegistrationsService, RegistrationsService},
        submissions::{LeadSubmissionsService, SubmissionsService},
    },
    relay::{
        AdminEmailNotifier, AdminNotifier, EmailClient, EmailConfig, RelayError, WebhookClient,
        WebhookConfig, WebhookForwarder,
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply migrations")]
    Migrations(#[source] MigrateError),

    #[error("failed to build relay client")]
    Relay(#[source] RelayError),

    #[error("failed to build hosted auth client")]
    Auth(#[source] HostedAuthError),
}

/// Settings for the services the app talks to over HTTP.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub auth: HostedAuthConfig,
    pub webhook: WebhookConfig,
    pub email: EmailConfig,
}

#[derive(Clone)]
pub struct AppContext {
    pub registrations: Arc<dyn RegistrationsService>,
    pub courses: Arc<dyn CoursesService>,
    pub submissions: Arc<dyn SubmissionsService>,
    pub analytics: Arc<dyn AnalyticsService>,
    pub auth: Arc<dyn AuthService>,
    pub webhook: Arc<dyn WebhookForwarder>,
    pub admin_notifier: Arc<dyn AdminNotifier>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting, migrating or building an HTTP client fails.
    pub async fn from_database_url(
        url: &str,
        run_migrations: bool,
        settings: AppSettings,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        if run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrations)?;
        }

        Self::new(&Db::new(pool), settings)
    }

    /// Wire every service around an existing database handle.
    ///
    /// # Errors
    ///
    /// Returns an error when an outbound HTTP client cannot be built.
    pub fn new(db: &Db, settings: AppSettings) -> Result<Self, AppInitError> {
        let registrations: Arc<dyn RegistrationsService> =
            Arc::new(PgRegistrationsService::new(db.clone()));

        let courses: Arc<dyn CoursesService> = Arc::new(PgCoursesService::new(db.clone()));
        let audit: Arc<dyn AuditLog> = Arc::new(PgAuditLog::new(db));

        let webhook: Arc<dyn WebhookForwarder> =
            Arc::new(WebhookClient::new(settings.webhook).map_err(AppInitError::Relay)?);

        let identity = Arc::new(HostedAuthClient::new(settings.auth).map_err(AppInitError::Auth)?);
        let email = Arc::new(EmailClient::new(&settings.email).map_err(AppInitError::Relay)?);

        Ok(Self {
            submissions: Arc::new(LeadSubmissionsService::new(
                Arc::clone(&registrations),
                Arc::clone(&audit),
                Arc::clone(&webhook),
            )),
            analytics: Arc::new(RegistrationsAnalyticsService::new(
                Arc::clone(&registrations),
                Arc::clone(&courses),
            )),
            admin_notifier: Arc::new(AdminEmailNotifier::new(
                email,
                audit,
                &settings.email,
            )),
            auth: Arc::new(PgAuthService::new(db, identity)),
            registrations,
            courses,
            webhook,
        })
    }
}
