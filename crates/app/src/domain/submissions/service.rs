//! Submissions service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    domain::{
        audit::{
            AuditLog,
            data::{NewAnalyticsEvent, NewNotification, NewQuoteRequest, QuoteRequestType},
        },
        registrations::{
            RegistrationsService, RegistrationsServiceError,
            data::{Submission, SubmissionReceipt},
        },
    },
    relay::{WebhookForwarder, webhook::WebhookPayload},
};

/// Records leads. Only the registration insert can fail the submission.
#[derive(Clone)]
pub struct LeadSubmissionsService {
    registrations: Arc<dyn RegistrationsService>,
    audit: Arc<dyn AuditLog>,
    webhook: Arc<dyn WebhookForwarder>,
}

impl std::fmt::Debug for LeadSubmissionsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeadSubmissionsService").finish_non_exhaustive()
    }
}

impl LeadSubmissionsService {
    #[must_use]
    pub fn new(
        registrations: Arc<dyn RegistrationsService>,
        audit: Arc<dyn AuditLog>,
        webhook: Arc<dyn WebhookForwarder>,
    ) -> Self {
        Self {
            registrations,
            audit,
            webhook,
        }
    }

    async fn forward(&self, payload: WebhookPayload) {
        match self.webhook.forward(payload).await {
            Ok(response) if response.is_success() => {
                info!(status = %response.status, "lead forwarded to webhook");
            }
            Ok(response) => {
                warn!(
                    status = %response.status,
                    body = %response.body,
                    "webhook returned non-success status"
                );
            }
            Err(error) => warn!("failed to forward lead to webhook (non-critical): {error}"),
        }
    }
}

#[async_trait]
impl SubmissionsService for LeadSubmissionsService {
    async fn record_submission(
        &self,
        submission: Submission,
    ) -> Result<SubmissionReceipt, RegistrationsServiceError> {
        let now = Timestamp::now();
        let action = submission.action_type;

        let registration = self
            .registrations
            .create_registration(submission.to_new_registration(now))
            .await?;

        info!(registration = %registration.uuid, action = action.as_str(), "registration recorded");

        if let Err(error) = self
            .audit
            .record_notification(NewNotification::for_lead(&registration, action))
            .await
        {
            warn!("failed to record admin notification (non-critical): {error}");
        }

        if let Err(error) = self
            .audit
            .record_analytics_event(NewAnalyticsEvent::for_lead(&registration, action))
            .await
        {
            warn!("failed to record analytics event (non-critical): {error}");
        }

        if action.is_quote()
            && let Err(error) = self
                .audit
                .record_quote_request(NewQuoteRequest {
                    registration: Some(registration.uuid),
                    request_type: QuoteRequestType::Quote,
                    email_sent: false,
                    created_at: now,
                })
                .await
        {
            warn!("failed to record quote request (non-critical): {error}");
        }

        self.forward(WebhookPayload::from_submission(&submission, now))
            .await;

        Ok(SubmissionReceipt {
            registration: registration.uuid,
            submitted_at: registration.submission_date,
        })
    }
}

#[automock]
#[async_trait]
pub trait SubmissionsService: Send + Sync {
    /// Store a lead, write its audit rows and forward it to the webhook.
    async fn record_submission(
        &self,
        submission: Submission,
    ) -> Result<SubmissionReceipt, RegistrationsServiceError>;
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        domain::{
            audit::{AuditLogError, MockAuditLog, data::LeadKind},
            registrations::{
                MockRegistrationsService,
                data::NewRegistration,
                records::{RegistrationRecord, RegistrationUuid},
                status::{ActionType, RegistrationStatus},
            },
        },
        relay::{
            RelayError,
            webhook::{MockWebhookForwarder, WebhookResponse},
        },
    };

    use super::*;

    fn submission(action_type: ActionType) -> Submission {
        Submission {
            first_name: Some("Naledi".to_string()),
            surname: Some("Khumalo".to_string()),
            email: "naledi@example.com".to_string(),
            phone: "+27831234567".to_string(),
            course_selection: "Job Readiness (SP-201201)".to_string(),
            number_of_seats: Some(2),
            action_type,
            ..Submission::default()
        }
    }

    fn stored(uuid: RegistrationUuid, new: NewRegistration) -> RegistrationRecord {
        RegistrationRecord {
            uuid,
            name: new.name,
            email: new.email,
            phone: new.phone,
            company_name: new.company_name,
            vat_number: new.vat_number,
            course_selection: new.course_selection,
            number_of_seats: new.number_of_seats,
            status: RegistrationStatus::Pending,
            submission_date: new.submission_date,
        }
    }

    fn registrations(uuid: RegistrationUuid) -> MockRegistrationsService {
        let mut registrations = MockRegistrationsService::new();

        registrations
            .expect_create_registration()
            .once()
            .withf(|new| new.name == "Naledi Khumalo" && new.number_of_seats == 2)
            .returning(move |new| Ok(stored(uuid, new)));

        registrations
    }

    fn webhook_ok() -> MockWebhookForwarder {
        let mut webhook = MockWebhookForwarder::new();

        webhook.expect_forward().once().returning(|_| {
            Ok(WebhookResponse {
                status: StatusCode::OK,
                body: json!({ "status": "success" }),
            })
        });

        webhook
    }

    #[tokio::test]
    async fn signup_writes_notification_and_event_but_no_quote() -> TestResult {
        let uuid = RegistrationUuid::new();

        let mut audit = MockAuditLog::new();

        audit
            .expect_record_notification()
            .once()
            .withf(|notification| {
                notification.kind == LeadKind::Signup
                    && notification.message == "Naledi Khumalo signed up for Job Readiness (SP-201201)"
            })
            .returning(|_| Ok(()));

        audit
            .expect_record_analytics_event()
            .once()
            .withf(|event| event.kind == LeadKind::Signup && event.value == 1)
            .returning(|_| Ok(()));

        audit.expect_record_quote_request().never();

        let service = LeadSubmissionsService::new(
            Arc::new(registrations(uuid)),
            Arc::new(audit),
            Arc::new(webhook_ok()),
        );

        let receipt = service
            .record_submission(submission(ActionType::Register))
            .await?;

        assert_eq!(receipt.registration, uuid);

        Ok(())
    }

    #[tokio::test]
    async fn quote_also_writes_pending_quote_request() -> TestResult {
        let uuid = RegistrationUuid::new();

        let mut audit = MockAuditLog::new();

        audit.expect_record_notification().once().returning(|_| Ok(()));
        audit.expect_record_analytics_event().once().returning(|_| Ok(()));
        audit
            .expect_record_quote_request()
            .once()
            .withf(move |request| {
                request.registration == Some(uuid)
                    && request.request_type == QuoteRequestType::Quote
                    && !request.email_sent
            })
            .returning(|_| Ok(()));

        let mut webhook = MockWebhookForwarder::new();

        webhook
            .expect_forward()
            .once()
            .withf(|payload| payload.action_type == "quote" && payload.full_name == "Naledi Khumalo")
            .returning(|_| {
                Ok(WebhookResponse {
                    status: StatusCode::OK,
                    body: json!("accepted"),
                })
            });

        let service = LeadSubmissionsService::new(
            Arc::new(registrations(uuid)),
            Arc::new(audit),
            Arc::new(webhook),
        );

        service.record_submission(submission(ActionType::Quote)).await?;

        Ok(())
    }

    #[tokio::test]
    async fn audit_and_webhook_failures_do_not_fail_submission() -> TestResult {
        let uuid = RegistrationUuid::new();

        let mut audit = MockAuditLog::new();

        audit
            .expect_record_notification()
            .once()
            .returning(|_| Err(AuditLogError::InvalidData));
        audit
            .expect_record_analytics_event()
            .once()
            .returning(|_| Err(AuditLogError::InvalidData));
        audit
            .expect_record_quote_request()
            .once()
            .returning(|_| Err(AuditLogError::InvalidReference));

        let mut webhook = MockWebhookForwarder::new();

        webhook
            .expect_forward()
            .once()
            .returning(|_| Err(RelayError::NotConfigured));

        let service = LeadSubmissionsService::new(
            Arc::new(registrations(uuid)),
            Arc::new(audit),
            Arc::new(webhook),
        );

        let receipt = service.record_submission(submission(ActionType::Quote)).await?;

        assert_eq!(receipt.registration, uuid);

        Ok(())
    }

    #[tokio::test]
    async fn non_success_webhook_status_is_swallowed() -> TestResult {
        let uuid = RegistrationUuid::new();

        let mut audit = MockAuditLog::new();

        audit.expect_record_notification().returning(|_| Ok(()));
        audit.expect_record_analytics_event().returning(|_| Ok(()));

        let mut webhook = MockWebhookForwarder::new();

        webhook.expect_forward().once().returning(|_| {
            Ok(WebhookResponse {
                status: StatusCode::BAD_GATEWAY,
                body: json!("upstream down"),
            })
        });

        let service = LeadSubmissionsService::new(
            Arc::new(registrations(uuid)),
            Arc::new(audit),
            Arc::new(webhook),
        );

        service
            .record_submission(submission(ActionType::Register))
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn registration_failure_skips_everything_else() {
        let mut registrations = MockRegistrationsService::new();

        registrations
            .expect_create_registration()
            .once()
            .returning(|_| Err(RegistrationsServiceError::InvalidData));

        let mut audit = MockAuditLog::new();

        audit.expect_record_notification().never();
        audit.expect_record_analytics_event().never();
        audit.expect_record_quote_request().never();

        let mut webhook = MockWebhookForwarder::new();

        webhook.expect_forward().never();

        let service = LeadSubmissionsService::new(
            Arc::new(registrations),
            Arc::new(audit),
            Arc::new(webhook),
        );

        let result = service
            .record_submission(submission(ActionType::Quote))
            .await;

        assert!(
            matches!(result, Err(RegistrationsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
    }
}
