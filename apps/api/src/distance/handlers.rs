use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::distance::airports::{find_airport, flights_url, search_airports, Airport};
use crate::distance::haversine::{duration_at_60_mph, meters_to_miles, miles_to_meters};
use crate::distance::{
    estimate_from_office, is_complete_address, miles_between, DistanceError, EstimateMethod,
    MIN_ADDRESS_LEN,
};
use crate::errors::{AppError, AppJson};
use crate::places::PlacesError;
use crate::state::AppState;

const DISTANCE_FAILED: &str = "Failed to calculate distance. Please enter distance manually.";

impl From<DistanceError> for AppError {
    fn from(err: DistanceError) -> Self {
        match err {
            DistanceError::Places(PlacesError::NotConfigured) => {
                PlacesError::NotConfigured.into()
            }
            other => {
                tracing::error!("Distance calculation error: {other}");
                AppError::Distance(DISTANCE_FAILED.to_string())
            }
        }
    }
}

#[derive(Deserialize)]
pub struct DistanceRequest {
    pub origin: Option<String>,
    pub destination: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TextValue {
    pub text: String,
    pub value: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DistanceResponse {
    pub distance: TextValue,
    pub duration: TextValue,
    pub origin: String,
    pub destination: String,
}

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// POST /api/v1/distance
pub async fn handle_distance(
    State(state): State<AppState>,
    AppJson(req): AppJson<DistanceRequest>,
) -> Result<Json<DistanceResponse>, AppError> {
    let (Some(origin), Some(destination)) = (required(req.origin), required(req.destination))
    else {
        return Err(AppError::Validation(
            "Origin and destination are required".to_string(),
        ));
    };

    let miles = miles_between(state.geocoder.as_ref(), &origin, &destination).await?;
    let (minutes, seconds) = duration_at_60_mph(miles);

    Ok(Json(DistanceResponse {
        distance: TextValue {
            text: format!("{miles} mi"),
            value: miles_to_meters(miles),
        },
        duration: TextValue {
            text: format!("{minutes} min"),
            value: seconds,
        },
        origin,
        destination,
    }))
}

#[derive(Deserialize)]
pub struct EstimateRequest {
    pub address: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EstimateResponse {
    pub miles: f64,
    pub method: EstimateMethod,
    pub location: String,
    pub from: String,
}

/// POST /api/v1/distance/estimate
pub async fn handle_estimate(
    State(state): State<AppState>,
    AppJson(req): AppJson<EstimateRequest>,
) -> Result<Json<EstimateResponse>, AppError> {
    let address = req.address.trim();
    if address.chars().count() < MIN_ADDRESS_LEN {
        return Err(AppError::Validation(format!(
            "Address must be at least {MIN_ADDRESS_LEN} characters"
        )));
    }

    let office = &state.config.office_address;
    let estimate = estimate_from_office(state.geocoder.as_ref(), office, address)
        .await
        .ok_or_else(|| {
            AppError::NotFound("No distance estimate available for this address".to_string())
        })?;

    Ok(Json(EstimateResponse {
        miles: estimate.miles,
        method: estimate.method,
        location: estimate.location,
        from: office.clone(),
    }))
}

#[derive(Deserialize)]
pub struct AirportQuery {
    #[serde(default)]
    pub q: String,
}

/// GET /api/v1/airports?q=
pub async fn handle_search_airports(Query(params): Query<AirportQuery>) -> Json<Vec<Airport>> {
    Json(search_airports(&params.q))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FlightsUrlResponse {
    pub origin: String,
    pub destination: String,
    pub url: String,
}

/// GET /api/v1/airports/:code/flights-url
pub async fn handle_flights_url(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<FlightsUrlResponse>, AppError> {
    let airport = find_airport(&code)
        .ok_or_else(|| AppError::NotFound(format!("Airport {code} not found")))?;
    let origin = state.config.origin_airport.clone();
    let today = chrono::Utc::now().date_naive();

    Ok(Json(FlightsUrlResponse {
        url: flights_url(&origin, airport.code, today),
        origin,
        destination: airport.code.to_string(),
    }))
}

#[derive(Deserialize)]
pub struct FlightMileageRequest {
    pub airport_code: String,
    pub hotel_address: String,
    pub project_address: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FlightMileageResponse {
    pub airport_to_hotel: f64,
    pub hotel_to_project: f64,
    pub total_local: f64,
}

/// POST /api/v1/distance/flight-mileage
///
/// Local driving in flight mode: arrival airport to hotel, then hotel to project.
pub async fn handle_flight_mileage(
    State(state): State<AppState>,
    AppJson(req): AppJson<FlightMileageRequest>,
) -> Result<Json<FlightMileageResponse>, AppError> {
    if !is_complete_address(&req.hotel_address) || !is_complete_address(&req.project_address) {
        return Err(AppError::UnprocessableEntity(
            "Please enter complete addresses with city and state".to_string(),
        ));
    }
    let airport = find_airport(&req.airport_code)
        .ok_or_else(|| AppError::NotFound(format!("Airport {} not found", req.airport_code)))?;

    let geocoder = state.geocoder.as_ref();
    let to_hotel = miles_between(geocoder, airport.address, &req.hotel_address).await?;
    let to_project = miles_between(geocoder, &req.hotel_address, &req.project_address).await?;

    let airport_to_hotel = meters_to_miles(miles_to_meters(to_hotel));
    let hotel_to_project = meters_to_miles(miles_to_meters(to_project));
    if airport_to_hotel == 0.0 || hotel_to_project == 0.0 {
        return Err(AppError::UnprocessableEntity(
            "Could not calculate one or both distances. Please enter manually.".to_string(),
        ));
    }

    Ok(Json(FlightMileageResponse {
        airport_to_hotel,
        hotel_to_project,
        total_local: airport_to_hotel + hotel_to_project,
    }))
}
