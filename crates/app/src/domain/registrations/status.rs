//! Registration Status

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Where a registration sits in the invoicing pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegistrationStatus {
    Pending,
    Invoiced,
    Paid,
}

impl RegistrationStatus {
    pub const ALL: [Self; 3] = [Self::Pending, Self::Invoiced, Self::Paid];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Invoiced => "invoiced",
            Self::Paid => "paid",
        }
    }

    /// Human label used in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Invoiced => "Invoiced",
            Self::Paid => "Paid",
        }
    }

    /// Status only ever moves forward; skipping `invoiced` is allowed.
    #[must_use]
    pub fn can_advance_to(self, next: Self) -> bool {
        next > self
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown registration status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for RegistrationStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "invoiced" => Ok(Self::Invoiced),
            "paid" => Ok(Self::Paid),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Whether the visitor asked to register or asked for a quote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActionType {
    #[default]
    Register,
    Quote,
}

impl ActionType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Register => "register",
            Self::Quote => "quote",
        }
    }

    #[must_use]
    pub const fn is_quote(self) -> bool {
        matches!(self, Self::Quote)
    }
}

impl FromStr for ActionType {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "register" => Ok(Self::Register),
            "quote" => Ok(Self::Quote),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}
