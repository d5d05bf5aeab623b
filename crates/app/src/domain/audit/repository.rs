//! Audit Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{PgPool, query};

use crate::domain::audit::data::{NewAnalyticsEvent, NewNotification, NewQuoteRequest};

const CREATE_NOTIFICATION_SQL: &str = include_str!("sql/create_notification.sql");
const CREATE_ANALYTICS_EVENT_SQL: &str = include_str!("sql/create_analytics_event.sql");
const CREATE_QUOTE_REQUEST_SQL: &str = include_str!("sql/create_quote_request.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgAuditRepository {
    pool: PgPool,
}

impl PgAuditRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn create_notification(
        &self,
        notification: NewNotification,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_NOTIFICATION_SQL)
            .bind(notification.kind.as_str())
            .bind(notification.title)
            .bind(notification.message)
            .bind(notification.metadata)
            .bind(SqlxTimestamp::from(notification.created_at))
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub(crate) async fn create_analytics_event(
        &self,
        event: NewAnalyticsEvent,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_ANALYTICS_EVENT_SQL)
            .bind(event.kind.as_str())
            .bind(event.value)
            .bind(event.course_id)
            .bind(event.metadata)
            .bind(SqlxTimestamp::from(event.recorded_at))
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub(crate) async fn create_quote_request(
        &self,
        request: NewQuoteRequest,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_QUOTE_REQUEST_SQL)
            .bind(request.registration.map(|uuid| uuid.into_uuid()))
            .bind(request.request_type.as_str())
            .bind(request.email_sent)
            .bind(SqlxTimestamp::from(request.created_at))
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
