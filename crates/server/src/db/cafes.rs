//! Cafe repository for database operations.
//!
//! Every method issues a single statement against the `cafe` table.

use sqlx::SqlitePool;

use cafe_core::CafeId;

use super::RepositoryError;
use crate::models::{Cafe, NewCafe};

const CAFE_COLUMNS: &str = "id, name, map_url, img_url, location, seats, \
     has_toilet, has_wifi, has_sockets, can_take_calls, coffee_price";

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `SQLite` cafe queries.
#[derive(Debug, sqlx::FromRow)]
struct CafeRow {
    id: i64,
    name: String,
    map_url: String,
    img_url: String,
    location: String,
    seats: String,
    has_toilet: bool,
    has_wifi: bool,
    has_sockets: bool,
    can_take_calls: bool,
    coffee_price: Option<String>,
}

impl From<CafeRow> for Cafe {
    fn from(row: CafeRow) -> Self {
        Self {
            id: CafeId::new(row.id),
            name: row.name,
            map_url: row.map_url,
            img_url: row.img_url,
            location: row.location,
            seats: row.seats,
            has_toilet: row.has_toilet,
            has_wifi: row.has_wifi,
            has_sockets: row.has_sockets,
            can_take_calls: row.can_take_calls,
            coffee_price: row.coffee_price,
        }
    }
}

/// Repository for cafe database operations.
pub struct CafeRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CafeRepository<'a> {
    /// Create a new cafe repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List every cafe in storage order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Cafe>, RepositoryError> {
        let rows = sqlx::query_as::<_, CafeRow>(&format!(
            "SELECT {CAFE_COLUMNS} FROM cafe ORDER BY id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Cafe::from).collect())
    }

    /// Pick one cafe uniformly at random.
    ///
    /// Returns `None` when the table is empty.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_random(&self) -> Result<Option<Cafe>, RepositoryError> {
        let row = sqlx::query_as::<_, CafeRow>(&format!(
            "SELECT {CAFE_COLUMNS} FROM cafe ORDER BY RANDOM() LIMIT 1"
        ))
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Cafe::from))
    }

    /// Get a cafe by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: CafeId) -> Result<Option<Cafe>, RepositoryError> {
        let row = sqlx::query_as::<_, CafeRow>(&format!(
            "SELECT {CAFE_COLUMNS} FROM cafe WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Cafe::from))
    }

    /// Find cafes whose location exactly equals `location` (case-sensitive).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_location(&self, location: &str) -> Result<Vec<Cafe>, RepositoryError> {
        let rows = sqlx::query_as::<_, CafeRow>(&format!(
            "SELECT {CAFE_COLUMNS} FROM cafe WHERE location = ? ORDER BY id"
        ))
        .bind(location)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Cafe::from).collect())
    }

    /// Insert a new cafe and return it with its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if a cafe with the same name exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn insert(&self, cafe: &NewCafe) -> Result<Cafe, RepositoryError> {
        let row = sqlx::query_as::<_, CafeRow>(&format!(
            r"
            INSERT INTO cafe (name, map_url, img_url, location, seats,
                              has_toilet, has_wifi, has_sockets, can_take_calls, coffee_price)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {CAFE_COLUMNS}
            "
        ))
        .bind(&cafe.name)
        .bind(&cafe.map_url)
        .bind(&cafe.img_url)
        .bind(&cafe.location)
        .bind(&cafe.seats)
        .bind(cafe.has_toilet)
        .bind(cafe.has_wifi)
        .bind(cafe.has_sockets)
        .bind(cafe.can_take_calls)
        .bind(cafe.coffee_price.as_deref())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict(format!(
                    "a cafe named '{}' already exists",
                    cafe.name
                ));
            }
            RepositoryError::Database(e)
        })?;

        Ok(Cafe::from(row))
    }

    /// Overwrite the coffee price of a cafe. `None` clears the price.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no cafe has this ID.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_price(
        &self,
        id: CafeId,
        new_price: Option<&str>,
    ) -> Result<Cafe, RepositoryError> {
        let row = sqlx::query_as::<_, CafeRow>(&format!(
            "UPDATE cafe SET coffee_price = ? WHERE id = ? RETURNING {CAFE_COLUMNS}"
        ))
        .bind(new_price)
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(Cafe::from).ok_or(RepositoryError::NotFound)
    }

    /// Permanently delete a cafe.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no cafe has this ID.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: CafeId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM cafe WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Count all cafes.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cafe")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Count cafes per location, most populous first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_by_location(&self) -> Result<Vec<(String, i64)>, RepositoryError> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            r"
            SELECT location, COUNT(*) AS cafe_count
            FROM cafe
            GROUP BY location
            ORDER BY cafe_count DESC, location ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
