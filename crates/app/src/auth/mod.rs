//! Admin authentication

mod errors;
pub mod hosted;
mod models;
mod repository;
mod service;

pub use errors::*;
pub use hosted::{
    HostedAuthClient, HostedAuthConfig, HostedAuthError, IdentityProvider, MockIdentityProvider,
};
pub use models::*;
pub use repository::PgAdminUsersRepository;
pub use service::*;
