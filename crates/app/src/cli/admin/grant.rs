use academy_app::{auth::PgAdminUsersRepository, database};
use clap::Args;
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct GrantAdminArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Hosted auth user id
    #[arg(long)]
    user_id: Uuid,

    /// Admin email address
    #[arg(long)]
    email: String,
}

pub(crate) async fn run(args: GrantAdminArgs) -> Result<(), String> {
    let email = args.email.trim();

    if email.is_empty() {
        return Err("email cannot be empty".to_string());
    }

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let admin = PgAdminUsersRepository::new(pool)
        .grant_admin(args.user_id.into(), email)
        .await
        .map_err(|error| format!("failed to grant admin access: {error}"))?;

    println!("admin_uuid: {}", admin.uuid);
    println!("email: {}", admin.email);
    println!("created_at: {}", admin.created_at);

    Ok(())
}
