//! Academy Domain Concerns

pub mod analytics;
pub mod audit;
pub mod courses;
pub mod enquiries;
pub mod registrations;
pub mod submissions;
