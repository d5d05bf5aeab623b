use clap::{Args, Subcommand};

mod grant;
mod revoke;

#[derive(Debug, Args)]
pub(crate) struct AdminCommand {
    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Debug, Subcommand)]
enum AdminSubcommand {
    /// Allow a hosted auth user into the admin API
    Grant(grant::GrantAdminArgs),

    /// Remove a user from the admin API
    Revoke(revoke::RevokeAdminArgs),
}

pub(crate) async fn run(command: AdminCommand) -> Result<(), String> {
    match command.command {
        AdminSubcommand::Grant(args) => grant::run(args).await,
        AdminSubcommand::Revoke(args) => revoke::run(args).await,
    }
}
