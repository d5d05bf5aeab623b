//! Shared application domain, persistence and relay modules.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod relay;
pub mod secret;

#[cfg(test)]
mod test;

mod uuids;
