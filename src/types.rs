//! Wire model for the mapping provider's place and geocode responses.
//!
//! Everything here deserializes leniently: a response with missing or oddly
//! shaped fields still produces a value, and the extractor treats whatever is
//! missing as empty.

use std::fmt;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Response status meaning the request succeeded with results.
pub const STATUS_OK: &str = "OK";
/// Response status meaning the request succeeded with nothing to return.
pub const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";
/// Place details status for an unknown or expired place id.
pub const STATUS_NOT_FOUND: &str = "NOT_FOUND";

/// One labeled fragment of a place record (e.g. the city, the postal code).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressComponent {
    /// Full text of the component (e.g. "Paris")
    #[serde(default, deserialize_with = "lenient_string")]
    pub long_name: String,
    /// Abbreviated text of the component (e.g. "FR")
    #[serde(default, deserialize_with = "lenient_string")]
    pub short_name: String,
    /// Provider type tags (e.g. "locality", "political")
    #[serde(default, deserialize_with = "lenient_tags")]
    pub types: Vec<String>,
}

impl AddressComponent {
    /// Create a component whose short name equals its long name.
    pub fn new<I, S>(long_name: impl Into<String>, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let long_name = long_name.into();
        Self {
            short_name: long_name.clone(),
            long_name,
            types: types.into_iter().map(Into::into).collect(),
        }
    }

    /// Check whether this component carries the given type tag.
    pub fn has_type(&self, tag: &str) -> bool {
        self.types.iter().any(|t| t == tag)
    }
}

/// Latitude/longitude as the provider reports it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
}

/// Geometry attached to a place record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Representative point of the place
    pub location: LatLng,
    /// Precision hint (e.g. "ROOFTOP", "APPROXIMATE")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_type: Option<String>,
}

/// Structured response object describing a location and its address components.
///
/// `address_components` is `None` when the provider omitted it or sent something
/// that is not a list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceRecord {
    /// Ordered address components
    #[serde(deserialize_with = "lenient_components")]
    pub address_components: Option<Vec<AddressComponent>>,
    /// Location geometry
    #[serde(
        deserialize_with = "lenient_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub geometry: Option<Geometry>,
    /// Provider's own single-line rendering of the address
    #[serde(
        deserialize_with = "lenient_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub formatted_address: Option<String>,
    /// Provider place identifier
    #[serde(
        deserialize_with = "lenient_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub place_id: Option<String>,
}

impl PlaceRecord {
    /// Create a place record from a list of components.
    pub fn with_components(components: Vec<AddressComponent>) -> Self {
        Self {
            address_components: Some(components),
            ..Self::default()
        }
    }

    /// Build a place record from raw JSON.
    ///
    /// Returns `None` for anything that is not a JSON object.
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }

    /// Components in input order, empty when absent.
    pub fn components(&self) -> &[AddressComponent] {
        self.address_components.as_deref().unwrap_or_default()
    }
}

/// Pick the place out of a saved provider document.
///
/// Accepts either a single place record or a whole geocode response, in which
/// case the first result is used.
pub fn place_from_document(document: &Value) -> Option<PlaceRecord> {
    match document.get("results") {
        Some(Value::Array(results)) => results.first().and_then(PlaceRecord::from_value),
        _ => PlaceRecord::from_value(document),
    }
}

/// Read a saved provider document from disk; see [`place_from_document`].
///
/// # Errors
///
/// Returns [`Error::Io`] when the file cannot be read and
/// [`Error::Deserialize`] when it is not JSON.
pub fn load_place_document(path: &Path) -> Result<Option<PlaceRecord>> {
    let text = std::fs::read_to_string(path)?;
    parse_place_document(&text, &path.display().to_string())
}

/// Parse a provider document from text; see [`place_from_document`].
///
/// # Errors
///
/// Returns [`Error::Deserialize`] when `text` is not JSON.
pub fn parse_place_document(text: &str, context: &str) -> Result<Option<PlaceRecord>> {
    let document: Value =
        serde_json::from_str(text).map_err(|e| Error::deserialize(context, e))?;
    Ok(place_from_document(&document))
}

/// Body of a reverse geocoding response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GeocodeResponse {
    /// Provider status string
    pub status: String,
    /// Results, most specific first
    pub results: Vec<Value>,
    /// Provider error text for non-OK statuses
    pub error_message: Option<String>,
}

impl GeocodeResponse {
    /// The first result as a place record, if it is an object.
    pub fn first_place(&self) -> Option<PlaceRecord> {
        self.results.first().and_then(PlaceRecord::from_value)
    }
}

/// One autocomplete suggestion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Prediction {
    /// Human-readable suggestion text
    pub description: String,
    /// Identifier used to resolve the suggestion into a place
    pub place_id: String,
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

/// Body of an autocomplete response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AutocompleteResponse {
    /// Provider status string
    pub status: String,
    /// Suggestions in ranking order
    pub predictions: Vec<Prediction>,
    /// Provider error text for non-OK statuses
    pub error_message: Option<String>,
}

/// Body of a place details response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlaceDetailsResponse {
    /// Provider status string
    pub status: String,
    /// The resolved place
    #[serde(deserialize_with = "lenient_option")]
    pub result: Option<PlaceRecord>,
    /// Provider error text for non-OK statuses
    pub error_message: Option<String>,
}

/// A validated latitude/longitude pair, as produced by a geolocator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    lat: f64,
    lng: f64,
}

impl Coordinates {
    /// Create coordinates, rejecting non-finite or out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCoordinates`] unless `lat` is within
    /// `[-90, 90]` and `lng` within `[-180, 180]`.
    pub fn new(lat: f64, lng: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(Error::InvalidCoordinates { lat, lng });
        }
        Ok(Self { lat, lng })
    }

    /// Latitude in degrees
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees
    pub fn lng(&self) -> f64 {
        self.lng
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn lenient_tags<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_components<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Vec<AddressComponent>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter(Value::is_object)
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        ),
        _ => None,
    })
}

fn lenient_option<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}
