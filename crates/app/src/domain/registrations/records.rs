//! Registration Records

use jiff::Timestamp;

use crate::{domain::registrations::status::RegistrationStatus, uuids::TypedUuid};

/// Registration UUID
pub type RegistrationUuid = TypedUuid<RegistrationRecord>;

/// Registration Record
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationRecord {
    pub uuid: RegistrationUuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company_name: Option<String>,
    pub vat_number: Option<String>,
    pub course_selection: String,
    pub number_of_seats: u8,
    pub status: RegistrationStatus,
    pub submission_date: Timestamp,
}
