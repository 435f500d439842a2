use bazaar_app::config::AppConfig;
use clap::{Args, Subcommand};

mod migrate;

#[derive(Debug, Args)]
pub(crate) struct DbCommand {
    #[command(subcommand)]
    command: DbSubcommand,
}

#[derive(Debug, Subcommand)]
enum DbSubcommand {
    /// Apply pending relational schema migrations and create document indexes
    Migrate,
}

pub(crate) async fn run(config: &AppConfig, command: DbCommand) -> Result<(), String> {
    match command.command {
        DbSubcommand::Migrate => migrate::run(config).await,
    }
}
