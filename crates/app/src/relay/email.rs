//! Admin email notifications for quote and invoice requests.

use std::{str::FromStr, sync::Arc, time::Duration};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    domain::{
        audit::{
            AuditLog,
            data::{NewQuoteRequest, QuoteRequestType},
        },
        registrations::records::RegistrationUuid,
    },
    relay::RelayError,
    secret::Secret,
};

/// Email API settings.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub api_url: String,
    /// Sending is disabled when unset.
    pub api_key: Option<Secret>,
    pub from: String,
    pub admin_email: String,
    pub dashboard_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// Message accepted by the email API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Deserialize)]
struct EmailSent {
    id: String,
}

/// HTTP client for the transactional email API.
#[derive(Debug, Clone)]
pub struct EmailClient {
    api_url: String,
    api_key: Option<Secret>,
    http: Client,
}

impl EmailClient {
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(config: &EmailConfig) -> Result<Self, RelayError> {
        Ok(Self {
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            http: Client::builder().timeout(config.timeout).build()?,
        })
    }
}

#[async_trait]
impl EmailSender for EmailClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn send(&self, message: EmailMessage) -> Result<String, RelayError> {
        let key = self.api_key.as_ref().ok_or(RelayError::NotConfigured)?;

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(key.expose())
            .json(&message)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            return Err(RelayError::UnexpectedResponse { status, body });
        }

        let sent: EmailSent = response.json().await?;

        Ok(sent.id)
    }
}

#[automock]
#[async_trait]
pub trait EmailSender: Send + Sync {
    fn is_configured(&self) -> bool;

    /// Send a message, returning the provider's email id.
    async fn send(&self, message: EmailMessage) -> Result<String, RelayError>;
}

/// Which admin email to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminEmailKind {
    QuoteRequest,
    InvoiceRequest,
}

impl AdminEmailKind {
    const fn label(self) -> &'static str {
        match self {
            Self::QuoteRequest => "Quote",
            Self::InvoiceRequest => "Invoice",
        }
    }
}

impl From<AdminEmailKind> for QuoteRequestType {
    fn from(kind: AdminEmailKind) -> Self {
        match kind {
            AdminEmailKind::QuoteRequest => Self::Quote,
            AdminEmailKind::InvoiceRequest => Self::Invoice,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported email type: {0}")]
pub struct UnknownEmailKind(pub String);

impl FromStr for AdminEmailKind {
    type Err = UnknownEmailKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "quote_request" => Ok(Self::QuoteRequest),
            "invoice_request" => Ok(Self::InvoiceRequest),
            other => Err(UnknownEmailKind(other.to_string())),
        }
    }
}

/// Registration details quoted in the email.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailRegistration {
    pub id: Option<RegistrationUuid>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company_name: Option<String>,
    pub course_selection: String,
    pub number_of_seats: Option<u8>,
    pub submission_date: Option<Timestamp>,
}

/// Escape text for inclusion in HTML element content or attributes.
#[must_use]
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }

    escaped
}

/// Build the subject and HTML body for an admin email.
#[must_use]
pub fn render_admin_email(
    kind: AdminEmailKind,
    registration: &EmailRegistration,
    dashboard_url: &str,
) -> (String, String) {
    let label = kind.label();
    let subject = format!("New {label} Request - {}", registration.name);

    let company = registration
        .company_name
        .as_deref()
        .filter(|company| !company.trim().is_empty())
        .unwrap_or("N/A");

    let submitted = registration.submission_date.map_or_else(
        || "N/A".to_string(),
        |date| date.strftime("%Y-%m-%d %H:%M UTC").to_string(),
    );

    let html = format!(
        "<h2>New {label} Request</h2>\n\
         <p>A new request has been submitted. Please log in to your dashboard to view details.</p>\n\
         <h3>Registration Details:</h3>\n\
         <ul>\n\
         <li><strong>Name:</strong> {name}</li>\n\
         <li><strong>Email:</strong> {email}</li>\n\
         <li><strong>Phone:</strong> {phone}</li>\n\
         <li><strong>Company:</strong> {company}</li>\n\
         <li><strong>Course:</strong> {course}</li>\n\
         <li><strong>Number of Seats:</strong> {seats}</li>\n\
         <li><strong>Submitted:</strong> {submitted}</li>\n\
         </ul>\n\
         <p><a href=\"{dashboard}\">Go to Dashboard</a></p>\n",
        name = escape_html(&registration.name),
        email = escape_html(&registration.email),
        phone = escape_html(&registration.phone),
        company = escape_html(company),
        course = escape_html(&registration.course_selection),
        seats = registration.number_of_seats.unwrap_or(1),
        dashboard = escape_html(dashboard_url),
    );

    (subject, html)
}

/// Emails the admin team about quote and invoice requests.
#[derive(Clone)]
pub struct AdminEmailNotifier {
    sender: Arc<dyn EmailSender>,
    audit: Arc<dyn AuditLog>,
    from: String,
    admin_email: String,
    dashboard_url: String,
}

impl std::fmt::Debug for AdminEmailNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminEmailNotifier")
            .field("from", &self.from)
            .field("admin_email", &self.admin_email)
            .finish_non_exhaustive()
    }
}

impl AdminEmailNotifier {
    #[must_use]
    pub fn new(sender: Arc<dyn EmailSender>, audit: Arc<dyn AuditLog>, config: &EmailConfig) -> Self {
        Self {
            sender,
            audit,
            from: config.from.clone(),
            admin_email: config.admin_email.clone(),
            dashboard_url: config.dashboard_url.clone(),
        }
    }
}

#[async_trait]
impl AdminNotifier for AdminEmailNotifier {
    async fn notify(
        &self,
        kind: AdminEmailKind,
        registration: EmailRegistration,
    ) -> Result<String, RelayError> {
        if !self.sender.is_configured() {
            return Err(RelayError::NotConfigured);
        }

        let (subject, html) = render_admin_email(kind, &registration, &self.dashboard_url);

        if let Err(error) = self
            .audit
            .record_quote_request(NewQuoteRequest {
                registration: registration.id,
                request_type: kind.into(),
                email_sent: true,
                created_at: Timestamp::now(),
            })
            .await
        {
            warn!("failed to record quote request (non-critical): {error}");
        }

        let email_id = self
            .sender
            .send(EmailMessage {
                from: self.from.clone(),
                to: vec![self.admin_email.clone()],
                subject,
                html,
            })
            .await?;

        info!(%email_id, "admin email sent");

        Ok(email_id)
    }
}

#[automock]
#[async_trait]
pub trait AdminNotifier: Send + Sync {
    /// Record the request and email the admin team.
    async fn notify(
        &self,
        kind: AdminEmailKind,
        registration: EmailRegistration,
    ) -> Result<String, RelayError>;
}
