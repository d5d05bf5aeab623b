use academy_app::{auth::PgAdminUsersRepository, database};
use clap::Args;
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct RevokeAdminArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Hosted auth user id
    #[arg(long)]
    user_id: Uuid,
}

pub(crate) async fn run(args: RevokeAdminArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let removed = PgAdminUsersRepository::new(pool)
        .revoke_admin(args.user_id.into())
        .await
        .map_err(|error| format!("failed to revoke admin access: {error}"))?;

    if removed > 0 {
        println!("revoked admin {}", args.user_id);
    } else {
        println!("user {} was not an admin", args.user_id);
    }

    Ok(())
}
