//! Places client: the single point of entry for all Google Places API calls.
//!
//! No other module talks to the Places API directly. The API key is attached as the
//! `X-Goog-Api-Key` header so it never appears in logged URLs.
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub mod handlers;
pub mod models;

use models::{
    AddressPrediction, AutocompleteRequest, AutocompleteResponse, LatLng, PlaceDetails,
    SearchTextRequest, SearchTextResponse,
};

const AUTOCOMPLETE_FIELD_MASK: &str =
    "suggestions.placePrediction.placeId,suggestions.placePrediction.text";
const ADDRESS_DETAILS_FIELD_MASK: &str = "formattedAddress,addressComponents";
const LOCATION_FIELD_MASK: &str = "places.location";
const BUSINESS_SEARCH_FIELD_MASK: &str = "places.id,places.displayName,places.formattedAddress,places.businessStatus,places.types,places.rating,places.userRatingCount,places.nationalPhoneNumber,places.websiteUri";
const BUSINESS_DETAILS_FIELD_MASK: &str = "id,displayName,formattedAddress,businessStatus,types,rating,userRatingCount,nationalPhoneNumber,websiteUri";

/// Upper bound on suggestions enriched with a details lookup per autocomplete call.
pub const MAX_PREDICTIONS: usize = 5;

#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("Google Maps API key not configured")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid place id: {0:?}")]
    InvalidPlaceId(String),
}

#[derive(Debug, Deserialize)]
struct PlacesApiError {
    error: PlacesApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct PlacesApiErrorBody {
    message: String,
}

/// Anything that can turn a free-form address into coordinates.
///
/// The distance handlers depend on this trait rather than on `PlacesClient`, so the
/// router can be exercised without network access.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, address: &str) -> Result<Option<LatLng>, PlacesError>;
}

/// Thin wrapper over the Places API (New) with field masks per call site.
#[derive(Clone)]
pub struct PlacesClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl PlacesClient {
    pub fn new(
        api_key: Option<String>,
        base_url: &str,
        timeout_secs: u64,
    ) -> Result<Self, PlacesError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(timeout_secs))
                .build()?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn api_key(&self) -> Result<&str, PlacesError> {
        self.api_key.as_deref().ok_or(PlacesError::NotConfigured)
    }

    /// `places/{id}`. Place ids are URL-safe tokens; anything else is refused
    /// rather than spliced into the upstream path.
    fn place_path(place_id: &str) -> Result<String, PlacesError> {
        let valid = !place_id.is_empty()
            && place_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(PlacesError::InvalidPlaceId(place_id.to_string()));
        }
        Ok(format!("places/{place_id}"))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        field_mask: &str,
        body: &B,
    ) -> Result<T, PlacesError> {
        let key = self.api_key()?;
        let request = self
            .client
            .post(self.url(path))
            .header("X-Goog-Api-Key", key)
            .header("X-Goog-FieldMask", field_mask)
            .json(body);
        self.send(path, request).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        field_mask: &str,
    ) -> Result<T, PlacesError> {
        let key = self.api_key()?;
        let request = self
            .client
            .get(self.url(path))
            .header("X-Goog-Api-Key", key)
            .header("X-Goog-FieldMask", field_mask)
            .header("content-type", "application/json");
        self.send(path, request).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T, PlacesError> {
        debug!("Places API request: {}", self.url(path));

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Places API returned {}: {}", status, body);
            return Err(PlacesError::Api {
                status: status.as_u16(),
                message: upstream_error_message(&body, status.as_u16()),
            });
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Address autocomplete restricted to US street addresses and postal codes.
    ///
    /// Each of the first `MAX_PREDICTIONS` suggestions is enriched with the formatted
    /// address from a details lookup; a failed lookup keeps the prediction text.
    pub async fn autocomplete(&self, input: &str) -> Result<Vec<AddressPrediction>, PlacesError> {
        let request = AutocompleteRequest::us_addresses(input);
        let response: AutocompleteResponse = self
            .post_json("places:autocomplete", AUTOCOMPLETE_FIELD_MASK, &request)
            .await?;

        let mut predictions = Vec::new();
        for prediction in response
            .suggestions
            .unwrap_or_default()
            .into_iter()
            .take(MAX_PREDICTIONS)
            .filter_map(|s| s.place_prediction)
        {
            let description = match self.formatted_address(&prediction.place_id).await {
                Ok(Some(address)) => models::clean_formatted_address(&address),
                Ok(None) => prediction.text.text.clone(),
                Err(e) => {
                    warn!(
                        place_id = %prediction.place_id,
                        "Place details lookup failed, using prediction text: {e}"
                    );
                    prediction.text.text.clone()
                }
            };
            predictions.push(AddressPrediction::from_description(
                prediction.place_id,
                description,
            ));
        }

        debug!("Autocomplete produced {} predictions", predictions.len());
        Ok(predictions)
    }

    async fn formatted_address(&self, place_id: &str) -> Result<Option<String>, PlacesError> {
        let details: PlaceDetails = self
            .get_json(&Self::place_path(place_id)?, ADDRESS_DETAILS_FIELD_MASK)
            .await?;
        Ok(details.formatted_address)
    }

    /// Resolves an address to coordinates via a single-result text search.
    pub async fn locate(&self, address: &str) -> Result<Option<LatLng>, PlacesError> {
        let request = SearchTextRequest::single(address);
        let response: SearchTextResponse = self
            .post_json("places:searchText", LOCATION_FIELD_MASK, &request)
            .await?;
        Ok(response.first_location())
    }

    /// Business text search; the payload is forwarded untouched.
    pub async fn search_text(&self, payload: &Value) -> Result<Value, PlacesError> {
        self.post_json("places:searchText", BUSINESS_SEARCH_FIELD_MASK, payload)
            .await
    }

    /// Business details for a place id, returned as the upstream JSON.
    pub async fn place_details(&self, place_id: &str) -> Result<Value, PlacesError> {
        let path = Self::place_path(place_id)?;
        self.get_json(&path, BUSINESS_DETAILS_FIELD_MASK).await
    }
}

#[async_trait]
impl Geocoder for PlacesClient {
    async fn geocode(&self, address: &str) -> Result<Option<LatLng>, PlacesError> {
        self.locate(address).await
    }
}

/// Extracts `error.message` from an upstream error body, falling back to the raw body
/// (or the status line when the body is empty).
fn upstream_error_message(body: &str, status: u16) -> String {
    match serde_json::from_str::<PlacesApiError>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) if body.trim().is_empty() => format!("HTTP error! status: {status}"),
        Err(_) => body.to_string(),
    }
}
