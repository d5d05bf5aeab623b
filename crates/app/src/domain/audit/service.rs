//! Audit log service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::audit::{
        data::{NewAnalyticsEvent, NewNotification, NewQuoteRequest},
        errors::AuditLogError,
        repository::PgAuditRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgAuditLog {
    repository: PgAuditRepository,
}

impl PgAuditLog {
    #[must_use]
    pub fn new(db: &Db) -> Self {
        Self {
            repository: PgAuditRepository::new(db.pool().clone()),
        }
    }
}

#[async_trait]
impl AuditLog for PgAuditLog {
    async fn record_notification(
        &self,
        notification: NewNotification,
    ) -> Result<(), AuditLogError> {
        self.repository
            .create_notification(notification)
            .await
            .map_err(Into::into)
    }

    async fn record_analytics_event(&self, event: NewAnalyticsEvent) -> Result<(), AuditLogError> {
        self.repository
            .create_analytics_event(event)
            .await
            .map_err(Into::into)
    }

    async fn record_quote_request(&self, request: NewQuoteRequest) -> Result<(), AuditLogError> {
        self.repository
            .create_quote_request(request)
            .await
            .map_err(Into::into)
    }
}

/// Write-once rows kept for the admin team. Nothing reads them back.
#[automock]
#[async_trait]
pub trait AuditLog: Send + Sync {
    async fn record_notification(&self, notification: NewNotification)
    -> Result<(), AuditLogError>;

    async fn record_analytics_event(&self, event: NewAnalyticsEvent) -> Result<(), AuditLogError>;

    async fn record_quote_request(&self, request: NewQuoteRequest) -> Result<(), AuditLogError>;
}
