//! Cafe JSON API route handlers.
//!
//! Each handler performs exactly one repository operation and wraps the result
//! in the JSON envelope clients expect (`cafe`, `response`, `success`, `error`).
//!
//! Search misses, wrong API keys, and deleting an unknown cafe answer with
//! `200 OK` and an `error` body. Existing clients rely on that, so those
//! handlers pass the status explicitly.

use axum::{
    Form, Json,
    extract::{Path, Query, State, rejection::FormRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::instrument;

use cafe_core::{CafeId, coerce_flag};

use crate::db::{CafeRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::models::{Cafe, NewCafe};
use crate::state::AppState;

const NO_CAFES_MESSAGE: &str = "Sorry, there are no cafes in the database yet.";
const NO_CAFE_AT_LOCATION_MESSAGE: &str = "Sorry, we don't have a cafe at that location.";
const UNKNOWN_CAFE_MESSAGE: &str = "Sorry a cafe with that id was not found in the database.";
const WRONG_API_KEY_MESSAGE: &str =
    "Sorry, that's not allowed. Make sure you have the correct api_key.";

/// List envelope: `{"cafe": [...]}`.
#[derive(Debug, Serialize)]
pub struct CafeList {
    pub cafe: Vec<Cafe>,
}

/// Query string for `GET /search`.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub loc: Option<String>,
}

/// Form body for `POST /add`.
///
/// Every field is optional at the extractor level so a missing field becomes
/// a JSON error instead of a plain-text extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct AddCafeForm {
    pub name: Option<String>,
    pub map_url: Option<String>,
    pub img_url: Option<String>,
    pub location: Option<String>,
    pub seats: Option<String>,
    pub has_toilet: Option<String>,
    pub has_wifi: Option<String>,
    pub has_sockets: Option<String>,
    pub can_take_calls: Option<String>,
    pub coffee_price: Option<String>,
}

impl TryFrom<AddCafeForm> for NewCafe {
    type Error = AppError;

    fn try_from(form: AddCafeForm) -> Result<Self> {
        Ok(Self {
            name: required(form.name, "name")?,
            map_url: required(form.map_url, "map_url")?,
            img_url: required(form.img_url, "img_url")?,
            location: required(form.location, "location")?,
            seats: required(form.seats, "seats")?,
            has_toilet: coerce_flag(form.has_toilet.as_deref()),
            has_wifi: coerce_flag(form.has_wifi.as_deref()),
            has_sockets: coerce_flag(form.has_sockets.as_deref()),
            can_take_calls: coerce_flag(form.can_take_calls.as_deref()),
            coffee_price: form.coffee_price,
        })
    }
}

fn required(value: Option<String>, field: &str) -> Result<String> {
    value.ok_or_else(|| AppError::BadRequest(format!("missing required field: {field}")))
}

/// Form body for `PATCH /update-price/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdatePriceForm {
    pub new_price: Option<String>,
}

/// Form body for `DELETE /report-closed/{id}`.
#[derive(Debug, Deserialize)]
pub struct ReportClosedForm {
    pub api_key: Option<String>,
}

/// Return one cafe chosen uniformly at random.
///
/// GET /random
///
/// # Errors
///
/// Returns `AppError::NotFound` (404) when there are no cafes.
#[instrument(skip(state))]
pub async fn random(State(state): State<AppState>) -> Result<Json<Cafe>> {
    let cafe = CafeRepository::new(state.pool())
        .get_random()
        .await?
        .ok_or_else(|| AppError::NotFound(NO_CAFES_MESSAGE.to_string()))?;

    Ok(Json(cafe))
}

/// Return every cafe.
///
/// GET /get_all
///
/// # Errors
///
/// Returns `AppError::Database` if the query fails.
#[instrument(skip(state))]
pub async fn get_all(State(state): State<AppState>) -> Result<Json<CafeList>> {
    let cafes = CafeRepository::new(state.pool()).list_all().await?;
    tracing::debug!(count = cafes.len(), "Listed cafes");

    Ok(Json(CafeList { cafe: cafes }))
}

/// Return cafes whose location exactly matches `loc`.
///
/// GET /search?loc=X
///
/// # Errors
///
/// Returns `AppError::Database` if the query fails.
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Response> {
    let cafes = match query.loc.as_deref() {
        Some(loc) => CafeRepository::new(state.pool()).find_by_location(loc).await?,
        None => Vec::new(),
    };

    if cafes.is_empty() {
        return Ok(AppError::NotFound(NO_CAFE_AT_LOCATION_MESSAGE.to_string())
            .into_response_with_status(StatusCode::OK));
    }

    Ok(Json(CafeList { cafe: cafes }).into_response())
}

/// Add a new cafe from form fields.
///
/// POST /add
///
/// Amenity flags are coerced with [`coerce_flag`]; the five descriptive
/// fields are required.
///
/// # Errors
///
/// Returns `AppError::BadRequest` (400) if a required field is missing.
/// Returns `AppError::Conflict` (409) if the name is already taken.
#[instrument(skip(state, form))]
pub async fn add(
    State(state): State<AppState>,
    Form(form): Form<AddCafeForm>,
) -> Result<Json<Value>> {
    let new_cafe = NewCafe::try_from(form)?;
    let cafe = CafeRepository::new(state.pool()).insert(&new_cafe).await?;
    tracing::info!(cafe_id = %cafe.id, name = %cafe.name, "Cafe added");

    Ok(Json(json!({
        "response": { "success": "Successfully added the new cafe." }
    })))
}

/// Overwrite a cafe's coffee price. An absent `new_price` (or no form body
/// at all) clears it.
///
/// PATCH /update-price/{id}
///
/// # Errors
///
/// Returns `AppError::NotFound` (404) if no cafe has this ID.
#[instrument(skip(state, form))]
pub async fn update_price(
    State(state): State<AppState>,
    Path(id): Path<CafeId>,
    form: std::result::Result<Form<UpdatePriceForm>, FormRejection>,
) -> Result<Json<Value>> {
    let new_price = form.ok().and_then(|Form(f)| f.new_price);

    CafeRepository::new(state.pool())
        .update_price(id, new_price.as_deref())
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound(UNKNOWN_CAFE_MESSAGE.to_string()),
            other => AppError::Database(other),
        })?;
    tracing::info!(cafe_id = %id, "Coffee price updated");

    Ok(Json(json!({ "success": "Successfully updated the price." })))
}

/// Delete a cafe that has closed. Requires the shared API key.
///
/// DELETE /report-closed/{id}
///
/// The key is checked before the lookup, so a wrong key never reveals
/// whether the cafe exists. A request without a form body counts as a
/// missing key.
///
/// # Errors
///
/// Returns `AppError::Database` if the delete fails for a reason other than
/// a missing cafe.
#[instrument(skip(state, form))]
pub async fn report_closed(
    State(state): State<AppState>,
    Path(id): Path<CafeId>,
    form: std::result::Result<Form<ReportClosedForm>, FormRejection>,
) -> Result<Response> {
    let api_key = form.ok().and_then(|Form(f)| f.api_key);

    if !state.credentials().verify(api_key.as_deref()) {
        tracing::warn!(cafe_id = %id, "Rejected delete with invalid api_key");
        return Ok(AppError::Forbidden(WRONG_API_KEY_MESSAGE.to_string())
            .into_response_with_status(StatusCode::OK));
    }

    match CafeRepository::new(state.pool()).delete(id).await {
        Ok(()) => {
            tracing::info!(cafe_id = %id, "Cafe reported closed and deleted");
            Ok(Json(json!({ "response": "The cafe was successfully deleted." })).into_response())
        }
        Err(RepositoryError::NotFound) => Ok(AppError::NotFound(UNKNOWN_CAFE_MESSAGE.to_string())
            .into_response_with_status(StatusCode::OK)),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> AddCafeForm {
        AddCafeForm {
            name: Some("Science Gallery".to_string()),
            map_url: Some("https://maps.example/sg".to_string()),
            img_url: Some("https://img.example/sg.jpg".to_string()),
            location: Some("London Bridge".to_string()),
            seats: Some("20-30".to_string()),
            has_toilet: Some("yes".to_string()),
            has_wifi: Some("0".to_string()),
            has_sockets: Some("TRUE".to_string()),
            can_take_calls: None,
            coffee_price: Some("£2.40".to_string()),
        }
    }

    #[test]
    fn test_form_coerces_flags() {
        let cafe = NewCafe::try_from(complete_form()).ok();
        let cafe = cafe.as_ref();

        assert_eq!(cafe.map(|c| c.has_toilet), Some(true));
        assert_eq!(cafe.map(|c| c.has_wifi), Some(false));
        assert_eq!(cafe.map(|c| c.has_sockets), Some(true));
        assert_eq!(cafe.map(|c| c.can_take_calls), Some(false));
        assert_eq!(
            cafe.and_then(|c| c.coffee_price.as_deref()),
            Some("£2.40")
        );
    }

    #[test]
    fn test_form_missing_required_field_is_bad_request() {
        let form = AddCafeForm {
            seats: None,
            ..complete_form()
        };

        match NewCafe::try_from(form) {
            Err(AppError::BadRequest(msg)) => assert!(msg.contains("seats")),
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }

    #[test]
    fn test_form_price_is_optional() {
        let form = AddCafeForm {
            coffee_price: None,
            ..complete_form()
        };

        let cafe = NewCafe::try_from(form).ok();
        assert_eq!(cafe.map(|c| c.coffee_price), Some(None));
    }
}
