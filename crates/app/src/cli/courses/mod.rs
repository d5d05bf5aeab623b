use clap::{Args, Subcommand};

mod seed;

#[derive(Debug, Args)]
pub(crate) struct CoursesCommand {
    #[command(subcommand)]
    command: CoursesSubcommand,
}

#[derive(Debug, Subcommand)]
enum CoursesSubcommand {
    /// Upsert the default catalogue by course code
    Seed(seed::SeedArgs),
}

pub(crate) async fn run(command: CoursesCommand) -> Result<(), String> {
    match command.command {
        CoursesSubcommand::Seed(args) => seed::run(args).await,
    }
}
