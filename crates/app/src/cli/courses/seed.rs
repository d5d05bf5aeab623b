use academy_app::{
    database::{self, Db},
    domain::courses::{CoursesService, PgCoursesService},
};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct SeedArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: SeedArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let seeded = PgCoursesService::new(Db::new(pool))
        .seed_defaults()
        .await
        .map_err(|error| format!("failed to seed courses: {error}"))?;

    for course in seeded {
        println!(
            "{}  {}  ({})",
            course.details.course_code,
            course.details.course_name,
            course.details.upcoming_date.as_deref().unwrap_or("no date")
        );
    }

    Ok(())
}
