//! Google Maps Platform implementation of the provider seam.
//!
//! Uses the Geocoding API for reverse lookups and the Places web service
//! (autocomplete + place details) for suggestions. Requests are made once;
//! there is no retry, caching or rate limiting.

use std::fmt;
use std::sync::Arc;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::config::ProviderConfig;
use crate::error::{Error, Result};
use crate::provider::{AutocompleteSession, GeocodingProvider, InputHandle};
use crate::types::{
    AutocompleteResponse, Coordinates, GeocodeResponse, PlaceDetailsResponse, PlaceRecord,
    Prediction, STATUS_NOT_FOUND, STATUS_OK, STATUS_ZERO_RESULTS,
};

/// Place fields requested when resolving a suggestion.
pub const PLACE_FIELDS: &str = "address_component,geometry";

/// Google Maps geocoding provider.
///
/// # Examples
///
/// ```rust,no_run
/// use address_autofill::{Coordinates, GeocodingProvider, GoogleMapsProvider, ProviderConfig};
///
/// # async fn run() -> address_autofill::Result<()> {
/// let mut provider = GoogleMapsProvider::new(ProviderConfig::builder().api_key("key").build());
/// provider.load_provider().await?;
/// let place = provider.reverse_geocode(Coordinates::new(48.8584, 2.2945)?).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct GoogleMapsProvider {
    config: ProviderConfig,
    api: Option<Arc<GoogleApi>>,
}

impl GoogleMapsProvider {
    /// Create an unloaded provider.
    pub fn new(config: ProviderConfig) -> Self {
        Self { config, api: None }
    }

    /// Create an unloaded provider configured from the environment.
    pub fn from_env() -> Self {
        Self::new(ProviderConfig::from_env())
    }

    /// Get the configuration used by this provider.
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn api(&self, action: &str) -> Result<&Arc<GoogleApi>> {
        self.api
            .as_ref()
            .ok_or_else(|| Error::not_loaded(format!("{action} before load_provider")))
    }
}

impl GeocodingProvider for GoogleMapsProvider {
    type Autocomplete = GoogleAutocomplete;

    async fn load_provider(&mut self) -> Result<()> {
        if self.api.is_some() {
            return Ok(());
        }

        self.config.validate()?;
        let api_key = self.config.require_api_key()?.to_string();
        let client = Client::builder()
            .timeout(self.config.timeout())
            .user_agent(&self.config.user_agent)
            .build()?;

        info!(geocode_url = %self.config.geocode_url, "Google Maps provider loaded");
        self.api = Some(Arc::new(GoogleApi {
            client,
            api_key,
            config: self.config.clone(),
        }));
        Ok(())
    }

    fn is_loaded(&self) -> bool {
        self.api.is_some()
    }

    fn create_autocomplete(&self, input: &InputHandle) -> Result<GoogleAutocomplete> {
        let api = self.api("create_autocomplete")?;
        Ok(GoogleAutocomplete {
            api: Arc::clone(api),
            input: input.clone(),
        })
    }

    async fn reverse_geocode(&self, coords: Coordinates) -> Result<Option<PlaceRecord>> {
        let api = self.api("reverse_geocode")?;
        let response: GeocodeResponse = api
            .get_json(
                &api.config.geocode_url,
                &[("latlng", coords.to_string())],
                "geocode response",
            )
            .await?;

        if !check_status(&response.status, response.error_message.as_deref())? {
            debug!(%coords, "no geocode result");
            return Ok(None);
        }
        Ok(response.first_place())
    }
}

/// Autocomplete session bound to an input.
#[derive(Debug, Clone)]
pub struct GoogleAutocomplete {
    api: Arc<GoogleApi>,
    input: InputHandle,
}

impl AutocompleteSession for GoogleAutocomplete {
    async fn predictions(&self) -> Result<Vec<Prediction>> {
        let text = self.input.value();
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let url = self.api.places_endpoint("autocomplete");
        let response: AutocompleteResponse = self
            .api
            .get_json(&url, &[("input", text)], "autocomplete response")
            .await?;

        if !check_status(&response.status, response.error_message.as_deref())? {
            return Ok(Vec::new());
        }
        Ok(response.predictions)
    }

    async fn place_for(&self, prediction: &Prediction) -> Result<Option<PlaceRecord>> {
        let url = self.api.places_endpoint("details");
        let response: PlaceDetailsResponse = self
            .api
            .get_json(
                &url,
                &[
                    ("place_id", prediction.place_id.clone()),
                    ("fields", PLACE_FIELDS.to_string()),
                ],
                "place details response",
            )
            .await?;

        if !check_status(&response.status, response.error_message.as_deref())? {
            return Ok(None);
        }
        Ok(response.result)
    }
}

struct GoogleApi {
    client: Client,
    api_key: String,
    config: ProviderConfig,
}

impl fmt::Debug for GoogleApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleApi")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl GoogleApi {
    fn places_endpoint(&self, service: &str) -> String {
        format!(
            "{}/{service}/json",
            self.config.places_url.trim_end_matches('/')
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
        context: &str,
    ) -> Result<T> {
        debug!(url, "provider request");

        let mut request = self
            .client
            .get(url)
            .query(params)
            .query(&[("key", self.api_key.as_str())]);
        if let Some(language) = &self.config.language {
            request = request.query(&[("language", language.as_str())]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "provider request failed");
            return Err(Error::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| Error::deserialize(context, e))
    }
}

/// `Ok(true)` when the response carries results, `Ok(false)` when the provider
/// found nothing, an error for every other status.
fn check_status(status: &str, error_message: Option<&str>) -> Result<bool> {
    match status {
        STATUS_OK | "" => Ok(true),
        STATUS_ZERO_RESULTS | STATUS_NOT_FOUND => Ok(false),
        other => {
            let message = error_message.unwrap_or_default();
            warn!(status = other, error_message = message, "provider returned an error status");
            Err(Error::provider(other, message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_status() {
        assert!(check_status("OK", None).unwrap());
        assert!(!check_status("ZERO_RESULTS", None).unwrap());
        assert!(!check_status("NOT_FOUND", None).unwrap());

        match check_status("OVER_QUERY_LIMIT", Some("slow down")) {
            Err(Error::Provider { status, message }) => {
                assert_eq!(status, "OVER_QUERY_LIMIT");
                assert_eq!(message, "slow down");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_load_requires_api_key() {
        let mut provider = GoogleMapsProvider::new(ProviderConfig::default());
        assert!(matches!(provider.load_provider().await, Err(Error::MissingApiKey)));
        assert!(!provider.is_loaded());
    }

    #[tokio::test]
    async fn test_load_is_idempotent() {
        let mut provider =
            GoogleMapsProvider::new(ProviderConfig::builder().api_key("test-key").build());
        provider.load_provider().await.unwrap();
        provider.load_provider().await.unwrap();
        assert!(provider.is_loaded());
    }

    #[test]
    fn test_autocomplete_requires_load() {
        let provider = GoogleMapsProvider::new(ProviderConfig::builder().api_key("k").build());
        let result = provider.create_autocomplete(&InputHandle::new());
        assert!(matches!(result, Err(Error::ProviderNotLoaded { .. })));
    }

    #[tokio::test]
    async fn test_places_endpoint() {
        let mut provider = GoogleMapsProvider::new(
            ProviderConfig::builder()
                .api_key("k")
                .places_url("http://localhost:1234/maps/api/place")
                .build(),
        );
        provider.load_provider().await.unwrap();
        let session = provider.create_autocomplete(&InputHandle::new()).unwrap();
        assert_eq!(
            session.api.places_endpoint("details"),
            "http://localhost:1234/maps/api/place/details/json"
        );
        assert!(session.predictions().await.unwrap().is_empty());
    }
}
