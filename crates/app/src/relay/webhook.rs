//! Automation webhook forwarding.

use std::{str::FromStr, time::Duration};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use reqwest::{Client, Response, StatusCode, header::CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::{domain::registrations::data::Submission, relay::RelayError};

/// Body encoding expected by the webhook.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WebhookEncoding {
    #[default]
    Json,
    Form,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown webhook encoding: {0} (expected json or form)")]
pub struct UnknownEncoding(pub String);

impl FromStr for WebhookEncoding {
    type Err = UnknownEncoding;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "form" => Ok(Self::Form),
            _ => Err(UnknownEncoding(value.to_string())),
        }
    }
}

/// Webhook connection settings.
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    /// Forwarding is disabled when unset.
    pub url: Option<String>,
    pub encoding: WebhookEncoding,
    pub timeout: Duration,
}

/// Lead fields as the automation platform expects them.
///
/// Missing text is sent as `""` rather than omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebhookPayload {
    pub first_name: String,
    pub surname: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub company_name: String,
    pub vat_number: String,
    pub course_selection: String,
    pub number_of_seats: u8,
    pub action_type: String,
    pub submission_date: String,
}

impl WebhookPayload {
    #[must_use]
    pub fn from_submission(submission: &Submission, now: Timestamp) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();

        Self {
            first_name: text(&submission.first_name),
            surname: text(&submission.surname),
            full_name: submission.resolved_name(),
            email: submission.email.clone(),
            phone: submission.phone.clone(),
            company_name: text(&submission.company_name),
            vat_number: text(&submission.vat_number),
            course_selection: submission.course_selection.clone(),
            number_of_seats: submission.seats(),
            action_type: submission.action_type.as_str().to_string(),
            submission_date: submission.submission_date.unwrap_or(now).to_string(),
        }
    }
}

/// Status and body captured from the webhook.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookResponse {
    pub status: StatusCode,
    /// Parsed JSON when the response said so, otherwise the raw text.
    pub body: Value,
}

impl WebhookResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// HTTP client for the automation webhook.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    config: WebhookConfig,
    http: Client,
}

impl WebhookClient {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(config: WebhookConfig) -> Result<Self, RelayError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { config, http })
    }

    async fn post<T: Serialize + Sync>(
        &self,
        json: &T,
        form: Option<Vec<(String, String)>>,
    ) -> Result<WebhookResponse, RelayError> {
        let url = self.config.url.as_deref().ok_or(RelayError::NotConfigured)?;

        let request = match (self.config.encoding, form) {
            (WebhookEncoding::Form, Some(pairs)) => self.http.post(url).form(&pairs),
            _ => self
                .http
                .post(url)
                .header(reqwest::header::ACCEPT, "application/json")
                .json(json),
        };

        let response = read_response(request.send().await?).await?;

        info!(status = %response.status, "webhook responded");

        Ok(response)
    }
}

async fn read_response(response: Response) -> Result<WebhookResponse, RelayError> {
    let status = response.status();

    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("application/json"));

    let text = response.text().await?;

    debug!(%status, body = %text, "webhook response body");

    let body = if is_json {
        serde_json::from_str(&text).unwrap_or_else(|_| Value::String(text))
    } else {
        Value::String(text)
    };

    Ok(WebhookResponse { status, body })
}

/// Flatten a JSON object into form fields.
///
/// Strings are sent as-is, `null` as empty, anything else as its JSON text.
///
/// # Errors
///
/// Returns [`RelayError::InvalidPayload`] when `body` is not an object.
pub fn form_pairs(body: &Value) -> Result<Vec<(String, String)>, RelayError> {
    let object = body
        .as_object()
        .ok_or_else(|| RelayError::InvalidPayload("expected a JSON object".to_string()))?;

    Ok(object
        .iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(text) => text.clone(),
                Value::Null => String::new(),
                other => other.to_string(),
            };

            (key.clone(), value)
        })
        .collect())
}

#[async_trait]
impl WebhookForwarder for WebhookClient {
    async fn forward(&self, payload: WebhookPayload) -> Result<WebhookResponse, RelayError> {
        let form = match self.config.encoding {
            WebhookEncoding::Form => {
                let body = serde_json::to_value(&payload)
                    .map_err(|error| RelayError::InvalidPayload(error.to_string()))?;

                Some(form_pairs(&body)?)
            }
            WebhookEncoding::Json => None,
        };

        self.post(&payload, form).await
    }

    async fn forward_raw(&self, body: Value) -> Result<WebhookResponse, RelayError> {
        let form = match self.config.encoding {
            WebhookEncoding::Form => Some(form_pairs(&body)?),
            WebhookEncoding::Json => None,
        };

        self.post(&body, form).await
    }
}

#[automock]
#[async_trait]
pub trait WebhookForwarder: Send + Sync {
    /// Send a lead in the platform's field layout.
    async fn forward(&self, payload: WebhookPayload) -> Result<WebhookResponse, RelayError>;

    /// Send an arbitrary JSON body unchanged.
    async fn forward_raw(&self, body: Value) -> Result<WebhookResponse, RelayError>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use crate::domain::registrations::status::ActionType;

    use super::*;

    #[test]
    fn payload_fills_defaults() -> TestResult {
        let now: Timestamp = "2026-03-04T10:15:00Z".parse()?;

        let payload = WebhookPayload::from_submission(
            &Submission {
                first_name: Some("Thandi".to_string()),
                surname: Some("Mokoena".to_string()),
                email: "thandi@example.com".to_string(),
                phone: "+27821234567".to_string(),
                course_selection: "Job Readiness (SP-201201)".to_string(),
                ..Submission::default()
            },
            now,
        );

        assert_eq!(payload.full_name, "Thandi Mokoena");
        assert_eq!(payload.company_name, "");
        assert_eq!(payload.vat_number, "");
        assert_eq!(payload.number_of_seats, 1);
        assert_eq!(payload.action_type, "register");
        assert_eq!(payload.submission_date, "2026-03-04T10:15:00Z");

        Ok(())
    }

    #[test]
    fn payload_keeps_submitted_values() -> TestResult {
        let submitted: Timestamp = "2026-03-01T08:00:00Z".parse()?;

        let payload = WebhookPayload::from_submission(
            &Submission {
                name: Some("Acme Buyer".to_string()),
                company_name: Some("Acme".to_string()),
                number_of_seats: Some(12),
                action_type: ActionType::Quote,
                submission_date: Some(submitted),
                ..Submission::default()
            },
            Timestamp::now(),
        );

        assert_eq!(payload.full_name, "Acme Buyer");
        assert_eq!(payload.first_name, "");
        assert_eq!(payload.company_name, "Acme");
        assert_eq!(payload.number_of_seats, 12);
        assert_eq!(payload.action_type, "quote");
        assert_eq!(payload.submission_date, "2026-03-01T08:00:00Z");

        Ok(())
    }

    #[test]
    fn form_pairs_flatten_scalars() -> TestResult {
        let pairs = form_pairs(&json!({
            "email": "lead@example.com",
            "number_of_seats": 4,
            "company_name": null,
        }))?;

        assert!(pairs.contains(&("email".to_string(), "lead@example.com".to_string())));
        assert!(pairs.contains(&("number_of_seats".to_string(), "4".to_string())));
        assert!(pairs.contains(&("company_name".to_string(), String::new())));

        Ok(())
    }

    #[test]
    fn form_pairs_reject_non_objects() {
        assert!(matches!(
            form_pairs(&json!(["not", "an", "object"])),
            Err(RelayError::InvalidPayload(_))
        ));
    }

    #[test]
    fn encoding_parses_case_insensitively() {
        assert_eq!("FORM".parse::<WebhookEncoding>(), Ok(WebhookEncoding::Form));
        assert_eq!("json".parse::<WebhookEncoding>(), Ok(WebhookEncoding::Json));
        assert!("xml".parse::<WebhookEncoding>().is_err());
    }

    #[tokio::test]
    async fn unconfigured_client_refuses_to_forward() -> TestResult {
        let client = WebhookClient::new(WebhookConfig {
            url: None,
            encoding: WebhookEncoding::Json,
            timeout: Duration::from_secs(1),
        })?;

        let result = client.forward_raw(json!({ "email": "lead@example.com" })).await;

        assert!(
            matches!(result, Err(RelayError::NotConfigured)),
            "expected NotConfigured, got {result:?}"
        );

        Ok(())
    }
}
