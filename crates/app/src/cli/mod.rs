use clap::{Parser, Subcommand};

mod admin;
mod analytics;
mod courses;
mod db;

#[derive(Debug, Parser)]
#[command(name = "academy-app", about = "Training academy admin CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Courses(courses::CoursesCommand),
    Admin(admin::AdminCommand),
    Analytics(analytics::AnalyticsCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Courses(command) => courses::run(command).await,
            Commands::Admin(command) => admin::run(command).await,
            Commands::Analytics(command) => analytics::run(command).await,
        }
    }
}
