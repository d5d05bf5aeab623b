//! Outbound relays: the automation webhook and the admin email API.

pub mod email;
mod errors;
pub mod webhook;

pub use email::{AdminEmailNotifier, AdminNotifier, EmailClient, EmailConfig, EmailSender};
pub use errors::RelayError;
pub use webhook::{WebhookClient, WebhookConfig, WebhookEncoding, WebhookForwarder};
