//! Analytics Handlers

pub(crate) mod report;
