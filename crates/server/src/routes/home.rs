//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::db::CafeRepository;
use crate::error::Result;
use crate::state::AppState;

/// Landing page listing the API endpoints.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct HomeTemplate {
    pub cafe_count: i64,
}

/// Render the landing page.
///
/// GET /
///
/// # Errors
///
/// Returns `AppError::Database` if the cafe count cannot be read.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Result<HomeTemplate> {
    let cafe_count = CafeRepository::new(state.pool()).count().await?;
    Ok(HomeTemplate { cafe_count })
}
