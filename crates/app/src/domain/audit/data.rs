//! Audit Data

use std::fmt;

use jiff::Timestamp;
use serde_json::{Value, json};

use crate::domain::registrations::{
    records::{RegistrationRecord, RegistrationUuid},
    status::ActionType,
};

/// What kind of lead an audit row describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadKind {
    Signup,
    QuoteRequest,
}

impl LeadKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Signup => "signup",
            Self::QuoteRequest => "quote_request",
        }
    }
}

impl From<ActionType> for LeadKind {
    fn from(action: ActionType) -> Self {
        match action {
            ActionType::Register => Self::Signup,
            ActionType::Quote => Self::QuoteRequest,
        }
    }
}

impl fmt::Display for LeadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row for `admin_notifications`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    pub kind: LeadKind,
    pub title: String,
    pub message: String,
    pub metadata: Value,
    pub created_at: Timestamp,
}

impl NewNotification {
    /// Notification raised when a lead is recorded.
    #[must_use]
    pub fn for_lead(registration: &RegistrationRecord, action: ActionType) -> Self {
        let kind = LeadKind::from(action);

        let (title, verb) = match kind {
            LeadKind::Signup => ("New Registration", "signed up"),
            LeadKind::QuoteRequest => ("New Quote Request", "requested a quote"),
        };

        Self {
            kind,
            title: title.to_string(),
            message: format!(
                "{} {verb} for {}",
                registration.name, registration.course_selection
            ),
            metadata: json!({
                "name": registration.name,
                "email": registration.email,
                "course": registration.course_selection,
                "company": registration.company_name,
                "seats": registration.number_of_seats,
                "registration_id": registration.uuid,
                "timestamp": registration.submission_date,
            }),
            created_at: registration.submission_date,
        }
    }
}

/// Row for `dashboard_analytics`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAnalyticsEvent {
    pub kind: LeadKind,
    pub value: i32,
    pub course_id: Option<String>,
    pub metadata: Value,
    pub recorded_at: Timestamp,
}

impl NewAnalyticsEvent {
    #[must_use]
    pub fn for_lead(registration: &RegistrationRecord, action: ActionType) -> Self {
        Self {
            kind: action.into(),
            value: 1,
            course_id: Some(registration.course_selection.clone()),
            metadata: json!({
                "registration_id": registration.uuid,
                "seats": registration.number_of_seats,
                "timestamp": registration.submission_date,
            }),
            recorded_at: registration.submission_date,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteRequestType {
    Quote,
    Invoice,
}

impl QuoteRequestType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quote => "quote",
            Self::Invoice => "invoice",
        }
    }
}

/// Row for `quote_requests`. Always starts `pending`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewQuoteRequest {
    pub registration: Option<RegistrationUuid>,
    pub request_type: QuoteRequestType,
    pub email_sent: bool,
    pub created_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use crate::domain::registrations::status::RegistrationStatus;

    use super::*;

    fn registration() -> RegistrationRecord {
        RegistrationRecord {
            uuid: RegistrationUuid::new(),
            name: "Sipho Dlamini".to_string(),
            email: "sipho@example.com".to_string(),
            phone: "+27821234567".to_string(),
            company_name: None,
            vat_number: None,
            course_selection: "New Venture Creation (SP-2110010)".to_string(),
            number_of_seats: 3,
            status: RegistrationStatus::Pending,
            submission_date: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn signup_notification_text() {
        let notification = NewNotification::for_lead(&registration(), ActionType::Register);

        assert_eq!(notification.kind, LeadKind::Signup);
        assert_eq!(notification.title, "New Registration");
        assert_eq!(
            notification.message,
            "Sipho Dlamini signed up for New Venture Creation (SP-2110010)"
        );
        assert_eq!(notification.metadata["seats"], 3);
    }

    #[test]
    fn quote_notification_text() {
        let notification = NewNotification::for_lead(&registration(), ActionType::Quote);

        assert_eq!(notification.kind.as_str(), "quote_request");
        assert_eq!(notification.title, "New Quote Request");
        assert_eq!(
            notification.message,
            "Sipho Dlamini requested a quote for New Venture Creation (SP-2110010)"
        );
    }

    #[test]
    fn analytics_event_counts_one_lead() {
        let registration = registration();
        let event = NewAnalyticsEvent::for_lead(&registration, ActionType::Register);

        assert_eq!(event.value, 1);
        assert_eq!(event.course_id.as_deref(), Some("New Venture Creation (SP-2110010)"));
        assert_eq!(
            event.metadata["registration_id"],
            registration.uuid.to_string()
        );
    }
}
