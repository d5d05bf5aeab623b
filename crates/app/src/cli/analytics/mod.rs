use clap::{Args, Subcommand};

mod summary;

#[derive(Debug, Args)]
pub(crate) struct AnalyticsCommand {
    #[command(subcommand)]
    command: AnalyticsSubcommand,
}

#[derive(Debug, Subcommand)]
enum AnalyticsSubcommand {
    /// Print the headline figures of the analytics report
    Summary(summary::SummaryArgs),
}

pub(crate) async fn run(command: AnalyticsCommand) -> Result<(), String> {
    match command.command {
        AnalyticsSubcommand::Summary(args) => summary::run(args).await,
    }
}
