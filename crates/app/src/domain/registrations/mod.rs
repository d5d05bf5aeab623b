//! Registrations

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;
pub mod status;
pub mod validation;

pub use errors::RegistrationsServiceError;
pub use service::*;
