//! Database operations for the cafe `SQLite` store.
//!
//! ## Tables
//!
//! - `cafe` - One row per cafe listing
//!
//! # Schema
//!
//! There are no versioned migrations. [`init_schema`] creates the single table
//! if it is missing and is safe to run on every startup:
//! ```bash
//! cargo run -p cafe-cli -- init
//! ```

pub mod cafes;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use thiserror::Error;

pub use cafes::CafeRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique cafe name).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

const CREATE_CAFE_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS cafe (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name VARCHAR(250) NOT NULL UNIQUE,
    map_url VARCHAR(500) NOT NULL,
    img_url VARCHAR(500) NOT NULL,
    location VARCHAR(250) NOT NULL,
    seats VARCHAR(250) NOT NULL,
    has_toilet BOOLEAN NOT NULL,
    has_wifi BOOLEAN NOT NULL,
    has_sockets BOOLEAN NOT NULL,
    can_take_calls BOOLEAN NOT NULL,
    coffee_price VARCHAR(250)
)
";

/// Create a `SQLite` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (wrapped in `SecretString`)
/// * `max_connections` - Upper bound on pooled connections
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(
    database_url: &SecretString,
    max_connections: u32,
) -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Create the `cafe` table if it does not exist.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the statement fails.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), RepositoryError> {
    sqlx::query(CREATE_CAFE_TABLE).execute(pool).await?;
    Ok(())
}
