//! Schema creation command.

use cafe_server::db;

use super::{CliError, connect};

/// Create the `cafe` table if it is missing.
///
/// # Errors
///
/// Returns an error if the database cannot be reached or the statement fails.
pub async fn run() -> Result<(), CliError> {
    let pool = connect().await?;
    db::init_schema(&pool).await?;
    tracing::info!("Cafe table ready");
    Ok(())
}
