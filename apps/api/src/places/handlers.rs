use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{AppError, AppJson};
use crate::places::models::AddressPrediction;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AutocompleteQuery {
    pub input: Option<String>,
}

#[derive(Serialize)]
pub struct AutocompleteResult {
    pub status: &'static str,
    pub predictions: Vec<AddressPrediction>,
}

/// GET /api/v1/places/autocomplete?input=
pub async fn handle_autocomplete(
    State(state): State<AppState>,
    Query(params): Query<AutocompleteQuery>,
) -> Result<Json<AutocompleteResult>, AppError> {
    let input = params
        .input
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation("Input parameter is required".to_string()))?;

    let predictions = state.places.autocomplete(input).await?;
    Ok(Json(AutocompleteResult {
        status: "OK",
        predictions,
    }))
}

#[derive(Deserialize)]
pub struct GeocodeRequest {
    pub address: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub lat: f64,
    pub lng: f64,
    pub address: String,
}

/// POST /api/v1/places/geocode
pub async fn handle_geocode(
    State(state): State<AppState>,
    AppJson(req): AppJson<GeocodeRequest>,
) -> Result<Json<GeocodeResult>, AppError> {
    let address = req
        .address
        .filter(|a| !a.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Address is required".to_string()))?;

    let location = state
        .geocoder
        .geocode(&address)
        .await?
        .ok_or_else(|| AppError::NotFound("Location not found".to_string()))?;

    Ok(Json(GeocodeResult {
        lat: location.lat,
        lng: location.lng,
        address,
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacesSearchRequest {
    pub action: String,
    #[serde(default)]
    pub payload: Option<Value>,
    #[serde(default)]
    pub place_id: Option<String>,
}

/// POST /api/v1/places/search
///
/// `searchText` forwards `payload` to the business text search; `getDetails` looks up
/// `placeId`. Upstream JSON is returned as-is.
pub async fn handle_places_search(
    State(state): State<AppState>,
    AppJson(req): AppJson<PlacesSearchRequest>,
) -> Result<Json<Value>, AppError> {
    match req.action.as_str() {
        "searchText" => {
            let payload = req
                .payload
                .ok_or_else(|| AppError::Validation("payload is required".to_string()))?;
            Ok(Json(state.places.search_text(&payload).await?))
        }
        "getDetails" => {
            let place_id = req
                .place_id
                .filter(|id| !id.trim().is_empty())
                .ok_or_else(|| AppError::Validation("placeId is required".to_string()))?;
            Ok(Json(state.places.place_details(&place_id).await?))
        }
        other => Err(AppError::Validation(format!("Invalid action: {other}"))),
    }
}
