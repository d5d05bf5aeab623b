//! Lead submissions: record, audit and forward.

pub mod service;

pub use service::*;
