//! Seed the cafe table from a YAML file.
//!
//! The file is a list of cafes using the same field names as the `/add` form,
//! with amenity flags as YAML booleans and `coffee_price` optional:
//!
//! ```yaml
//! - name: Social - Copeland Road
//!   map_url: https://g.page/CopelandSocial
//!   img_url: https://example.com/social.jpg
//!   location: Peckham
//!   seats: 20-30
//!   has_toilet: true
//!   has_wifi: true
//!   has_sockets: true
//!   can_take_calls: false
//!   coffee_price: "£2.75"
//! ```

use sqlx::SqlitePool;
use tracing::{info, warn};

use cafe_server::db::{self, CafeRepository, RepositoryError};
use cafe_server::models::NewCafe;

use super::{CliError, connect};

/// Outcome of a seeding run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub inserted: usize,
    pub skipped: usize,
}

/// Seed cafes from a YAML file.
///
/// # Arguments
///
/// * `file_path` - Path to the YAML file
/// * `skip_existing` - Skip cafes whose name is taken instead of aborting
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, the database cannot
/// be reached, or a duplicate is found without `skip_existing`.
pub async fn run(file_path: &str, skip_existing: bool) -> Result<(), CliError> {
    info!(path = %file_path, "Loading cafes from file");

    // Read and parse before connecting to the database
    let content = tokio::fs::read_to_string(file_path)
        .await
        .map_err(|source| CliError::Io {
            path: file_path.to_string(),
            source,
        })?;
    let cafes = parse(&content)?;
    info!(cafes = cafes.len(), "Parsed seed file");

    let pool = connect().await?;
    db::init_schema(&pool).await?;

    let summary = seed_cafes(&pool, &cafes, skip_existing).await?;

    info!("Seeding complete!");
    info!("  Cafes inserted: {}", summary.inserted);
    info!("  Cafes skipped (already exist): {}", summary.skipped);

    Ok(())
}

/// Parse a YAML list of cafes.
fn parse(content: &str) -> Result<Vec<NewCafe>, CliError> {
    Ok(serde_yaml::from_str(content)?)
}

/// Insert each cafe, optionally skipping names that already exist.
async fn seed_cafes(
    pool: &SqlitePool,
    cafes: &[NewCafe],
    skip_existing: bool,
) -> Result<SeedSummary, CliError> {
    let repo = CafeRepository::new(pool);
    let mut summary = SeedSummary::default();

    for cafe in cafes {
        match repo.insert(cafe).await {
            Ok(created) => {
                info!(cafe_id = %created.id, name = %created.name, "Inserted cafe");
                summary.inserted += 1;
            }
            Err(RepositoryError::Conflict(msg)) if skip_existing => {
                warn!(name = %cafe.name, "Skipping: {msg}");
                summary.skipped += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(summary)
}
