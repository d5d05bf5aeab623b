//! Admin authentication

mod errors;
pub(crate) mod middleware;

pub(crate) use errors::*;
