//! Admin sessions

mod handlers;

pub(crate) use handlers::*;
