//! Application configuration

use clap::Args;

/// Settings shared by every console command.
#[derive(Debug, Args)]
pub struct AppConfig {
    /// Relational store settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Document store settings.
    #[command(flatten)]
    pub documents: DocumentStoreConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,
}

/// Document store settings.
#[derive(Debug, Args)]
pub struct DocumentStoreConfig {
    /// `MongoDB` connection string
    #[arg(
        long,
        env = "MONGODB_URL",
        hide_env_values = true,
        default_value = "mongodb://localhost:27017"
    )]
    pub mongodb_url: String,

    /// `MongoDB` database holding reviews and notifications
    #[arg(long, env = "MONGODB_DATABASE", default_value = "bazaar")]
    pub mongodb_database: String,
}

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}
