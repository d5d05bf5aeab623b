//! Analytics service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::domain::{
    analytics::{errors::AnalyticsServiceError, report::AnalyticsReport, window::AnalyticsQuery},
    courses::CoursesService,
    registrations::RegistrationsService,
};

/// Recomputes the report from the full registration set on every call.
#[derive(Clone)]
pub struct RegistrationsAnalyticsService {
    registrations: Arc<dyn RegistrationsService>,
    courses: Arc<dyn CoursesService>,
}

impl std::fmt::Debug for RegistrationsAnalyticsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationsAnalyticsService")
            .finish_non_exhaustive()
    }
}

impl RegistrationsAnalyticsService {
    #[must_use]
    pub fn new(
        registrations: Arc<dyn RegistrationsService>,
        courses: Arc<dyn CoursesService>,
    ) -> Self {
        Self {
            registrations,
            courses,
        }
    }
}

#[async_trait]
impl AnalyticsService for RegistrationsAnalyticsService {
    async fn report(
        &self,
        query: AnalyticsQuery,
        now: Timestamp,
    ) -> Result<AnalyticsReport, AnalyticsServiceError> {
        let window = query.window(now)?;

        let (registrations, courses) = tokio::try_join!(
            async {
                self.registrations
                    .list_registrations()
                    .await
                    .map_err(AnalyticsServiceError::from)
            },
            async {
                self.courses
                    .list_courses()
                    .await
                    .map_err(AnalyticsServiceError::from)
            },
        )?;

        Ok(AnalyticsReport::compute(
            &registrations,
            &courses,
            &window,
            now,
        ))
    }
}

#[automock]
#[async_trait]
pub trait AnalyticsService: Send + Sync {
    /// Aggregate registrations over the window `query` resolves to at `now`.
    async fn report(
        &self,
        query: AnalyticsQuery,
        now: Timestamp,
    ) -> Result<AnalyticsReport, AnalyticsServiceError>;
}
