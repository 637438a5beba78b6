//! Cafe statistics command.

use cafe_server::db::CafeRepository;
use tracing::info;

use super::{CliError, connect};

/// Log the total number of cafes and the count per location.
///
/// # Errors
///
/// Returns an error if the database cannot be reached.
pub async fn run() -> Result<(), CliError> {
    let pool = connect().await?;
    let repo = CafeRepository::new(&pool);

    let total = repo.count().await?;
    let by_location = repo.count_by_location().await?;

    info!("Cafe Statistics");
    info!("===============");
    info!("Total cafes: {total}");
    info!("By location:");
    for (location, count) in by_location {
        info!("  {location}: {count}");
    }

    Ok(())
}
