//! Contact Enquiry Handler

use std::collections::BTreeMap;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use academy_app::domain::enquiries::ContactEnquiry;

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct ContactRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ContactAcceptedResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ContactErrorResponse {
    pub errors: BTreeMap<String, String>,
}

/// Contact Enquiry Handler
///
/// Enquiries are acknowledged and logged for follow-up.
#[endpoint(
    tags("contact"),
    summary = "Send Contact Enquiry",
    responses(
        (status_code = StatusCode::ACCEPTED, description = "Enquiry received"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid form fields"),
    ),
)]
pub(crate) async fn handler(json: JsonBody<ContactRequest>, res: &mut Response) {
    let request = json.into_inner();

    let enquiry = ContactEnquiry {
        name: request.name,
        email: request.email,
        phone: request.phone,
        subject: request.subject,
        message: request.message,
    };

    match enquiry.validate() {
        Ok(enquiry) => {
            info!(
                name = %enquiry.name,
                email = %enquiry.email,
                subject = enquiry.subject.as_deref().unwrap_or_default(),
                "contact enquiry received"
            );

            res.status_code(StatusCode::ACCEPTED)
                .render(Json(ContactAcceptedResponse {
                    message: "Thank you for your message. We'll get back to you soon.".to_string(),
                }));
        }
        Err(invalid) => {
            res.status_code(StatusCode::UNPROCESSABLE_ENTITY)
                .render(Json(ContactErrorResponse {
                    errors: invalid
                        .errors
                        .into_iter()
                        .map(|(field, message)| (field.to_string(), message.to_string()))
                        .collect(),
                }));
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    fn make_service() -> Service {
        Service::new(Router::with_path("contact").post(handler))
    }

    #[tokio::test]
    async fn test_valid_enquiry_is_accepted() -> TestResult {
        let res = TestClient::post("http://example.com/contact")
            .json(&json!({
                "name": "Lerato",
                "email": "lerato@example.com",
                "message": "When is the next intake?",
            }))
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::ACCEPTED), "enquiry accepted");

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_message_returns_422() -> TestResult {
        let mut res = TestClient::post("http://example.com/contact")
            .json(&json!({ "name": "Lerato", "email": "lerato@example.com" }))
            .send(&make_service())
            .await;

        let body: ContactErrorResponse = res.take_json().await?;

        assert_eq!(
            res.status_code,
            Some(StatusCode::UNPROCESSABLE_ENTITY),
            "message is required"
        );
        assert_eq!(
            body.errors.get("message").map(String::as_str),
            Some("Message is required"),
            "field-keyed message"
        );

        Ok(())
    }
}
