//! Test Helpers

use jiff::Timestamp;

use crate::{
    domain::registrations::{
        RegistrationsService, RegistrationsServiceError, data::NewRegistration,
        records::RegistrationRecord,
    },
    test::TestContext,
};

pub(crate) fn new_registration(name: &str, submitted: Timestamp) -> NewRegistration {
    NewRegistration {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_ascii_lowercase().replace(' ', ".")),
        phone: "+27821234567".to_string(),
        company_name: None,
        vat_number: None,
        course_selection: "Job Readiness (SP-201201)".to_string(),
        number_of_seats: 1,
        submission_date: submitted,
    }
}

pub(crate) async fn create_registration(
    ctx: &TestContext,
    name: &str,
) -> Result<RegistrationRecord, RegistrationsServiceError> {
    ctx.registrations
        .create_registration(new_registration(name, Timestamp::now()))
        .await
}
