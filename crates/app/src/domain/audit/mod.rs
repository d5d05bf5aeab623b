//! Audit rows written alongside lead submissions.

pub mod data;
pub mod errors;
mod repository;
pub mod service;

pub use errors::AuditLogError;
pub use service::*;
