//! Course Handlers

pub(crate) mod catalogue;
pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod index;
pub(crate) mod lists;
pub(crate) mod update;
