//! Integration tests for the cafe API.
//!
//! These tests talk to a running server over HTTP and are `#[ignore]`d by
//! default.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the server with a known API key
//! CAFE_API_KEY=integration-key cargo run -p cafe-server
//!
//! # Run integration tests
//! CAFE_API_KEY=integration-key cargo test -p cafe-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `CAFE_BASE_URL` - Server URL (default: `http://localhost:5000`)
//! - `CAFE_API_KEY` - Shared secret the server was started with
//!   (default: the built-in development key)

/// Base URL for the cafe API.
#[must_use]
pub fn base_url() -> String {
    std::env::var("CAFE_BASE_URL").unwrap_or_else(|_| "http://localhost:5000".to_string())
}

/// API key the server under test accepts for deletes.
#[must_use]
pub fn api_key() -> String {
    std::env::var("CAFE_API_KEY").unwrap_or_else(|_| "SECURE_API".to_string())
}
