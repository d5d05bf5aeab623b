//! Registration form validation.

use std::fmt;

use thiserror::Error;

use crate::domain::registrations::{
    data::{Submission, non_blank},
    status::ActionType,
};

pub const MIN_SEATS: u32 = 1;
pub const MAX_SEATS: u32 = 50;

const MAX_PHONE_DIGITS: usize = 16;

/// Raw registration form input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationForm {
    pub first_name: String,
    pub surname: String,
    pub email: String,
    pub phone: String,
    pub company_name: Option<String>,
    pub vat_number: Option<String>,
    pub course_selection: String,
    pub number_of_seats: u32,
    pub action_type: ActionType,
}

/// Form fields that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    FirstName,
    Surname,
    Email,
    Phone,
    CourseSelection,
    NumberOfSeats,
}

impl FormField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::Surname => "surname",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::CourseSelection => "course_selection",
            Self::NumberOfSeats => "number_of_seats",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rejected field and the message shown next to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub message: &'static str,
}

/// Every field that failed validation, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("registration form has {} invalid field(s)", .errors.len())]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    fn push(&mut self, field: FormField, message: &'static str) {
        self.errors.push(FieldError { field, message });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn message_for(&self, field: FormField) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message)
    }
}

impl RegistrationForm {
    /// Check the form and convert it into a [`Submission`].
    ///
    /// # Errors
    ///
    /// Returns every failing field when any rule is violated.
    pub fn validate(self) -> Result<Submission, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.first_name.trim().is_empty() {
            errors.push(FormField::FirstName, "First name is required");
        }

        if self.surname.trim().is_empty() {
            errors.push(FormField::Surname, "Surname is required");
        }

        if self.email.trim().is_empty() {
            errors.push(FormField::Email, "Email address is required");
        } else if !is_valid_email(&self.email) {
            errors.push(FormField::Email, "Please enter a valid email address");
        }

        if self.phone.trim().is_empty() {
            errors.push(FormField::Phone, "Phone number is required");
        } else if !is_valid_phone(&self.phone) {
            errors.push(FormField::Phone, "Please enter a valid phone number");
        }

        if self.course_selection.trim().is_empty() {
            errors.push(FormField::CourseSelection, "Please select a course");
        }

        let seats = u8::try_from(self.number_of_seats)
            .ok()
            .filter(|seats| (MIN_SEATS..=MAX_SEATS).contains(&u32::from(*seats)));

        if seats.is_none() {
            errors.push(
                FormField::NumberOfSeats,
                "Number of seats must be between 1 and 50",
            );
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let first_name = self.first_name.trim().to_string();
        let surname = self.surname.trim().to_string();

        Ok(Submission {
            full_name: Some(format!("{first_name} {surname}")),
            first_name: Some(first_name),
            surname: Some(surname),
            name: None,
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            company_name: non_blank(self.company_name.as_deref()).map(str::to_string),
            vat_number: non_blank(self.vat_number.as_deref()).map(str::to_string),
            course_selection: self.course_selection.trim().to_string(),
            number_of_seats: seats,
            action_type: self.action_type,
            submission_date: None,
        })
    }
}

/// `local@domain.tld`: no whitespace, exactly one `@`, and a dot in the domain
/// with something on both sides of it.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    // Any dot with text on both sides will do, so `a@b.c.` passes.
    domain
        .match_indices('.')
        .any(|(index, _)| index > 0 && index + 1 < domain.len())
}

/// Whitespace is ignored; an optional leading `+`, then a first digit 1-9 and
/// at most sixteen digits in total.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    let digits = compact.strip_prefix('+').unwrap_or(&compact);

    let mut chars = digits.chars();

    let Some(first) = chars.next() else {
        return false;
    };

    matches!(first, '1'..='9')
        && chars.all(|c| c.is_ascii_digit())
        && digits.len() <= MAX_PHONE_DIGITS
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn valid_form() -> RegistrationForm {
        RegistrationForm {
            first_name: "Thandi".to_string(),
            surname: "Mokoena".to_string(),
            email: "thandi@example.co.za".to_string(),
            phone: "+27 82 123 4567".to_string(),
            company_name: Some("Mokoena Holdings".to_string()),
            vat_number: None,
            course_selection: "Job Readiness (SP-201201)".to_string(),
            number_of_seats: 3,
            action_type: ActionType::Register,
        }
    }

    #[test]
    fn accepts_well_formed_input() -> TestResult {
        let submission = valid_form().validate()?;

        assert_eq!(submission.resolved_name(), "Thandi Mokoena");
        assert_eq!(submission.number_of_seats, Some(3));
        assert_eq!(submission.company_name.as_deref(), Some("Mokoena Holdings"));

        Ok(())
    }

    #[test]
    fn rejects_empty_required_fields() {
        let form = RegistrationForm {
            number_of_seats: 1,
            ..RegistrationForm::default()
        };

        let Err(errors) = form.validate() else {
            panic!("empty form should not validate");
        };

        assert_eq!(
            errors.message_for(FormField::FirstName),
            Some("First name is required")
        );
        assert_eq!(errors.message_for(FormField::Surname), Some("Surname is required"));
        assert_eq!(
            errors.message_for(FormField::Email),
            Some("Email address is required")
        );
        assert_eq!(
            errors.message_for(FormField::Phone),
            Some("Phone number is required")
        );
        assert_eq!(
            errors.message_for(FormField::CourseSelection),
            Some("Please select a course")
        );
        assert_eq!(errors.message_for(FormField::NumberOfSeats), None);
    }

    #[test]
    fn whitespace_only_name_is_rejected() {
        let form = RegistrationForm {
            first_name: "   ".to_string(),
            ..valid_form()
        };

        let result = form.validate();

        assert!(
            result.is_err_and(|errors| errors.message_for(FormField::FirstName).is_some()),
            "blank first name should be rejected"
        );
    }

    #[test]
    fn seat_count_must_be_within_bounds() {
        for seats in [0, 51, 300] {
            let form = RegistrationForm {
                number_of_seats: seats,
                ..valid_form()
            };

            let result = form.validate();

            assert!(
                result.is_err_and(|errors| errors.message_for(FormField::NumberOfSeats)
                    == Some("Number of seats must be between 1 and 50")),
                "{seats} seats should be rejected"
            );
        }

        for seats in [1, 50] {
            let form = RegistrationForm {
                number_of_seats: seats,
                ..valid_form()
            };

            assert!(form.validate().is_ok(), "{seats} seats should be accepted");
        }
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last+tag@sub.example.org"));

        assert!(!is_valid_email("plainaddress"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("user@.com"));
        assert!(!is_valid_email("user@example."));
        assert!(!is_valid_email("us er@example.com"));
        assert!(!is_valid_email("a@b@c.com"));
    }

    #[test]
    fn email_needs_one_inner_dot_not_a_final_label() {
        assert!(is_valid_email("a@b.c."), "trailing dot after a full label");
        assert!(is_valid_email("a@b.."), "second dot has text before it");
        assert!(is_valid_email("x@mail.example."), "fully qualified form");
        assert!(is_valid_email("x@.mail.example"), "leading dot, later dot inside");
    }

    #[test]
    fn phone_shape() {
        assert!(is_valid_phone("821234567"));
        assert!(is_valid_phone("+27 82 123 4567"));
        assert!(is_valid_phone("1234567890123456"));

        assert!(!is_valid_phone("0821234567"), "leading zero is not accepted");
        assert!(!is_valid_phone("12345678901234567"));
        assert!(!is_valid_phone("+"));
        assert!(!is_valid_phone("082-123-4567"));
        assert!(!is_valid_phone("++27821234567"));
    }

    #[test]
    fn invalid_email_message_differs_from_missing() {
        let form = RegistrationForm {
            email: "not-an-email".to_string(),
            ..valid_form()
        };

        let result = form.validate();

        assert!(
            result.is_err_and(|errors| errors.message_for(FormField::Email)
                == Some("Please enter a valid email address")),
            "malformed email should get the format message"
        );
    }
}
