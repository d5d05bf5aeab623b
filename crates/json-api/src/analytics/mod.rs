//! Registration analytics

mod errors;
mod handlers;

pub(crate) use handlers::*;
