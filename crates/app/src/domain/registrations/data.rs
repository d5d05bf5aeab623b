//! Registration Data

use jiff::Timestamp;

use crate::domain::registrations::{records::RegistrationUuid, status::ActionType};

const DEFAULT_SEATS: u8 = 1;
const UNKNOWN_NAME: &str = "Unknown";

/// New Registration Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewRegistration {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company_name: Option<String>,
    pub vat_number: Option<String>,
    pub course_selection: String,
    pub number_of_seats: u8,
    pub submission_date: Timestamp,
}

/// A lead as received from the public form or the relay endpoint.
///
/// Name parts are all optional because the relay accepts payloads from older
/// clients that send only `name`, or only `first_name`/`surname`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Submission {
    pub first_name: Option<String>,
    pub surname: Option<String>,
    pub full_name: Option<String>,
    pub name: Option<String>,
    pub email: String,
    pub phone: String,
    pub company_name: Option<String>,
    pub vat_number: Option<String>,
    pub course_selection: String,
    pub number_of_seats: Option<u8>,
    pub action_type: ActionType,
    pub submission_date: Option<Timestamp>,
}

impl Submission {
    /// Resolve the registrant's display name.
    ///
    /// Prefers an explicit full name, then `first_name surname`, then a bare
    /// `name`, and finally a placeholder.
    #[must_use]
    pub fn resolved_name(&self) -> String {
        if let Some(full_name) = non_blank(self.full_name.as_deref()) {
            return full_name.to_string();
        }

        let joined = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.surname.as_deref().unwrap_or_default()
        );

        if let Some(joined) = non_blank(Some(&joined)) {
            return joined.to_string();
        }

        non_blank(self.name.as_deref()).map_or_else(|| UNKNOWN_NAME.to_string(), str::to_string)
    }

    #[must_use]
    pub fn seats(&self) -> u8 {
        self.number_of_seats.unwrap_or(DEFAULT_SEATS)
    }

    /// Build the row to insert, stamped with `now`.
    #[must_use]
    pub fn to_new_registration(&self, now: Timestamp) -> NewRegistration {
        NewRegistration {
            name: self.resolved_name(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            company_name: non_blank(self.company_name.as_deref()).map(str::to_string),
            vat_number: non_blank(self.vat_number.as_deref()).map(str::to_string),
            course_selection: self.course_selection.trim().to_string(),
            number_of_seats: self.seats(),
            submission_date: now,
        }
    }
}

/// Outcome of a recorded submission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubmissionReceipt {
    pub registration: RegistrationUuid,
    pub submitted_at: Timestamp,
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
