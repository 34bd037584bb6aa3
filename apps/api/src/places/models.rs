//! Wire types for the Places API (New) and the reshaped responses we return.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Upstream request bodies
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutocompleteRequest<'a> {
    pub input: &'a str,
    pub included_primary_types: [&'static str; 2],
    pub included_region_codes: [&'static str; 1],
    pub language_code: &'static str,
}

impl<'a> AutocompleteRequest<'a> {
    pub fn us_addresses(input: &'a str) -> Self {
        Self {
            input,
            included_primary_types: ["street_address", "postal_code"],
            included_region_codes: ["us"],
            language_code: "en",
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchTextRequest<'a> {
    pub text_query: &'a str,
    pub max_result_count: u32,
    pub language_code: &'static str,
}

impl<'a> SearchTextRequest<'a> {
    pub fn single(text_query: &'a str) -> Self {
        Self {
            text_query,
            max_result_count: 1,
            language_code: "en",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Upstream responses
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AutocompleteResponse {
    pub suggestions: Option<Vec<Suggestion>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub place_prediction: Option<PlacePrediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacePrediction {
    pub place_id: String,
    pub text: FormattableText,
}

#[derive(Debug, Deserialize)]
pub struct FormattableText {
    pub text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDetails {
    pub formatted_address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchTextResponse {
    pub places: Option<Vec<PlaceWithLocation>>,
}

#[derive(Debug, Deserialize)]
pub struct PlaceWithLocation {
    pub location: Option<Location>,
}

#[derive(Debug, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl SearchTextResponse {
    pub fn first_location(&self) -> Option<LatLng> {
        self.places
            .as_ref()?
            .first()?
            .location
            .as_ref()
            .map(|l| LatLng {
                lat: l.latitude,
                lng: l.longitude,
            })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Our response shapes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredFormatting {
    pub main_text: String,
    pub secondary_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressPrediction {
    pub place_id: String,
    pub description: String,
    pub structured_formatting: StructuredFormatting,
}

impl AddressPrediction {
    /// Splits the description at the first comma into main and secondary text.
    pub fn from_description(place_id: String, description: String) -> Self {
        let (main_text, secondary_text) = match description.split_once(',') {
            Some((main, rest)) if !main.is_empty() => (main.to_string(), rest.trim().to_string()),
            Some((_, rest)) => (description.clone(), rest.trim().to_string()),
            None => (description.clone(), String::new()),
        };
        Self {
            place_id,
            description,
            structured_formatting: StructuredFormatting {
                main_text,
                secondary_text,
            },
        }
    }
}

/// Drops the trailing country from a US formatted address.
pub fn clean_formatted_address(address: &str) -> String {
    let address = address.strip_suffix(", USA").unwrap_or(address);
    let address = address.strip_suffix(", United States").unwrap_or(address);
    address.to_string()
}
