//! Distance estimation: geocoded great-circle miles with a static text fallback.
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::places::{Geocoder, PlacesError};

pub mod airports;
pub mod handlers;
pub mod haversine;
pub mod lookup;

use haversine::{haversine_miles, meters_to_miles, miles_to_meters};
use lookup::estimate_from_text;

/// Addresses shorter than this (after trimming) are not estimated.
pub const MIN_ADDRESS_LEN: usize = 10;
pub const DRIVING_DISTANCE_LABEL: &str = "Calculated from driving distance";

#[derive(Debug, Error)]
pub enum DistanceError {
    #[error(transparent)]
    Places(#[from] PlacesError),

    #[error("Could not geocode one or both addresses")]
    NotGeocoded,
}

/// Geocodes both addresses and returns the rounded great-circle miles between them.
pub async fn miles_between(
    geocoder: &dyn Geocoder,
    origin: &str,
    destination: &str,
) -> Result<f64, DistanceError> {
    let from = geocoder.geocode(origin).await?;
    let to = geocoder.geocode(destination).await?;
    match (from, to) {
        (Some(from), Some(to)) => {
            let miles = haversine_miles(from, to);
            debug!(miles, "Distance calculated");
            Ok(miles)
        }
        _ => Err(DistanceError::NotGeocoded),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EstimateMethod {
    DrivingDistance,
    CityLookup,
    StateEstimate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceEstimate {
    pub miles: f64,
    pub method: EstimateMethod,
    pub location: String,
}

/// One-way miles from `office` to `address`.
///
/// A non-zero geocoded distance wins; otherwise the address text is matched against
/// the city and state tables. `None` when nothing matches.
pub async fn estimate_from_office(
    geocoder: &dyn Geocoder,
    office: &str,
    address: &str,
) -> Option<DistanceEstimate> {
    match miles_between(geocoder, office, address).await {
        // Round-tripped through metres the same way the flight mileage is.
        Ok(miles) if miles > 0.0 => {
            return Some(DistanceEstimate {
                miles: meters_to_miles(miles_to_meters(miles)),
                method: EstimateMethod::DrivingDistance,
                location: DRIVING_DISTANCE_LABEL.to_string(),
            })
        }
        Ok(_) => debug!("Geocoded distance was zero, falling back to text lookup"),
        Err(DistanceError::Places(PlacesError::NotConfigured)) => {
            debug!("Places not configured, using text lookup")
        }
        Err(e) => warn!("Distance estimation failed, using text lookup: {e}"),
    }

    estimate_from_text(address).map(|est| DistanceEstimate {
        miles: f64::from(est.miles),
        method: if est.location.ends_with("(estimated)") {
            EstimateMethod::StateEstimate
        } else {
            EstimateMethod::CityLookup
        },
        location: est.location,
    })
}

/// A complete address has at least street, city and state segments.
pub fn is_complete_address(address: &str) -> bool {
    address.split(',').count() >= 3
}
