//! Analytics

pub mod errors;
pub mod report;
pub mod service;
pub mod window;

pub use errors::AnalyticsServiceError;
pub use service::*;
