//! CLI subcommands.

pub mod init;
pub mod seed;
pub mod stats;

use sqlx::SqlitePool;
use thiserror::Error;

use cafe_server::config::{CafeConfig, ConfigError};
use cafe_server::db::{self, RepositoryError};

/// Errors that can occur while running a CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Repository operation failed.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Seed file could not be read.
    #[error("Could not read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// Seed file is not valid YAML for a list of cafes.
    #[error("Invalid seed file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Load configuration and connect to the configured database.
async fn connect() -> Result<SqlitePool, CliError> {
    let config = CafeConfig::from_env()?;
    let pool = db::create_pool(&config.database_url, config.max_connections).await?;
    tracing::info!("Connected to database");
    Ok(pool)
}
