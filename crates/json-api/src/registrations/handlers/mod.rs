//! Registration Handlers

pub(crate) mod create;
pub(crate) mod index;
pub(crate) mod status;
