//! Shared fixtures for server tests.

#![allow(dead_code, clippy::unwrap_used)]

use secrecy::SecretString;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use cafe_server::config::CafeConfig;
use cafe_server::db;
use cafe_server::models::NewCafe;
use cafe_server::state::AppState;

pub const TEST_API_KEY: &str = "test-api-key-4f9c";

/// An in-memory database with the `cafe` table created.
///
/// A single connection that is never recycled keeps the in-memory database
/// alive for the whole test.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    db::init_schema(&pool).await.unwrap();
    pool
}

pub fn test_config() -> CafeConfig {
    CafeConfig {
        database_url: SecretString::from("sqlite::memory:"),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        api_key: SecretString::from(TEST_API_KEY),
        max_connections: 1,
        sentry_dsn: None,
        sentry_environment: None,
    }
}

pub async fn test_state() -> AppState {
    AppState::new(test_config(), test_pool().await)
}

pub fn new_cafe(name: &str, location: &str) -> NewCafe {
    NewCafe {
        name: name.to_string(),
        map_url: format!("https://maps.example/{name}"),
        img_url: format!("https://img.example/{name}.jpg"),
        location: location.to_string(),
        seats: "20-30".to_string(),
        has_toilet: true,
        has_wifi: false,
        has_sockets: true,
        can_take_calls: false,
        coffee_price: Some("£2.40".to_string()),
    }
}
