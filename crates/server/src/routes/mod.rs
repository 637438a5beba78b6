//! HTTP route handlers for the cafe server.
//!
//! # Route Structure
//!
//! ```text
//! GET    /                    - Landing page (HTML)
//! GET    /health              - Liveness check
//! GET    /health/ready        - Readiness check (database)
//!
//! # Cafes (JSON)
//! GET    /random              - One random cafe
//! GET    /get_all             - Every cafe
//! GET    /search?loc=X        - Cafes at an exact location
//! POST   /add                 - Add a cafe (form body)
//! PATCH  /update-price/{id}   - Change a cafe's coffee price (form: new_price)
//! DELETE /report-closed/{id}  - Delete a cafe (form: api_key)
//! ```

pub mod cafes;
pub mod health;
pub mod home;

use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::state::AppState;

/// Create the cafe API routes router.
pub fn cafe_routes() -> Router<AppState> {
    Router::new()
        .route("/random", get(cafes::random))
        .route("/get_all", get(cafes::get_all))
        .route("/search", get(cafes::search))
        .route("/add", post(cafes::add))
        .route("/update-price/{id}", patch(cafes::update_price))
        .route("/report-closed/{id}", delete(cafes::report_closed))
}

/// Create all routes for the cafe server.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(cafe_routes())
}
