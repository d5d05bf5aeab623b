//! Contact enquiries.
//!
//! Enquiries are acknowledged and logged, never stored.

use thiserror::Error;

use crate::domain::registrations::{data::non_blank, validation::is_valid_email};

/// A message sent through the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactEnquiry {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
}

/// Rejected enquiry fields as `(field, message)` pairs, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("contact enquiry has {} invalid field(s)", .errors.len())]
pub struct EnquiryErrors {
    pub errors: Vec<(&'static str, &'static str)>,
}

impl ContactEnquiry {
    /// Trim the enquiry and check the required fields.
    ///
    /// # Errors
    ///
    /// Returns every failing field when any rule is violated.
    pub fn validate(self) -> Result<Self, EnquiryErrors> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(("name", "Name is required"));
        }

        if self.email.trim().is_empty() {
            errors.push(("email", "Email address is required"));
        } else if !is_valid_email(&self.email) {
            errors.push(("email", "Please enter a valid email address"));
        }

        if self.message.trim().is_empty() {
            errors.push(("message", "Message is required"));
        }

        if !errors.is_empty() {
            return Err(EnquiryErrors { errors });
        }

        Ok(Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: non_blank(self.phone.as_deref()).map(str::to_string),
            subject: non_blank(self.subject.as_deref()).map(str::to_string),
            message: self.message.trim().to_string(),
        })
    }
}
