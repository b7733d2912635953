//! Provider configuration.

use std::fmt;
use std::time::Duration;

use crate::error::{Error, Result};

/// Environment variable holding the Maps Platform API key.
pub const API_KEY_ENV: &str = "GMAP_API_KEY";
/// Key variable name used by the Vite front-end build, read as a fallback.
pub const LEGACY_API_KEY_ENV: &str = "VITE_APP_GMAP_API_KEY";
/// Environment variable overriding the geocoding endpoint.
pub const GEOCODE_URL_ENV: &str = "GMAP_GEOCODE_URL";
/// Environment variable overriding the Places web service base URL.
pub const PLACES_URL_ENV: &str = "GMAP_PLACES_URL";

/// Default reverse geocoding endpoint.
pub const DEFAULT_GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
/// Default Places web service base URL.
pub const DEFAULT_PLACES_URL: &str = "https://maps.googleapis.com/maps/api/place";

/// Configuration for a geocoding provider.
#[derive(Clone)]
pub struct ProviderConfig {
    /// API key sent with every request
    pub api_key: Option<String>,

    /// Reverse geocoding endpoint
    pub geocode_url: String,

    /// Base URL for the autocomplete and place details endpoints
    pub places_url: String,

    /// Preferred result language (e.g. "fr"), provider default when unset
    pub language: Option<String>,

    /// Request timeout in seconds
    pub timeout_seconds: u64,

    /// User-Agent header value
    pub user_agent: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            geocode_url: DEFAULT_GEOCODE_URL.to_string(),
            places_url: DEFAULT_PLACES_URL.to_string(),
            language: None,
            timeout_seconds: 30,
            user_agent: concat!("address-autofill/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("geocode_url", &self.geocode_url)
            .field("places_url", &self.places_url)
            .field("language", &self.language)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ProviderConfig {
    /// Create a new configuration builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use address_autofill::ProviderConfig;
    ///
    /// let config = ProviderConfig::builder()
    ///     .api_key("my-key")
    ///     .language("fr")
    ///     .timeout_seconds(10)
    ///     .build();
    /// assert_eq!(config.api_key.as_deref(), Some("my-key"));
    /// ```
    pub fn builder() -> ProviderConfigBuilder {
        ProviderConfigBuilder::new()
    }

    /// Defaults overlaid with `GMAP_API_KEY` (or `VITE_APP_GMAP_API_KEY`),
    /// `GMAP_GEOCODE_URL` and `GMAP_PLACES_URL` when set and non-empty.
    pub fn from_env() -> Self {
        let mut config = Self {
            api_key: env_var(API_KEY_ENV).or_else(|| env_var(LEGACY_API_KEY_ENV)),
            ..Self::default()
        };
        if let Some(url) = env_var(GEOCODE_URL_ENV) {
            config.geocode_url = url;
        }
        if let Some(url) = env_var(PLACES_URL_ENV) {
            config.places_url = url;
        }
        config
    }

    /// The configured API key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingApiKey`] when no non-empty key is set.
    pub fn require_api_key(&self) -> Result<&str> {
        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(Error::MissingApiKey),
        }
    }

    /// Request timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Check the endpoints and timeout are usable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for a zero timeout or a non-HTTP endpoint.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_seconds == 0 {
            return Err(Error::config("timeout must be at least one second"));
        }
        for (name, url) in [("geocode_url", &self.geocode_url), ("places_url", &self.places_url)] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(Error::config(format!("{name} must be an http(s) URL: {url}")));
            }
        }
        Ok(())
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Builder for [`ProviderConfig`].
#[derive(Debug, Clone, Default)]
pub struct ProviderConfigBuilder {
    config: ProviderConfig,
}

impl ProviderConfigBuilder {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration, e.g. [`ProviderConfig::from_env`].
    pub fn from_config(config: ProviderConfig) -> Self {
        Self { config }
    }

    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    /// Set the reverse geocoding endpoint.
    pub fn geocode_url(mut self, url: impl Into<String>) -> Self {
        self.config.geocode_url = url.into();
        self
    }

    /// Set the Places web service base URL.
    pub fn places_url(mut self, url: impl Into<String>) -> Self {
        self.config.places_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the preferred result language.
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.config.language = Some(language.into());
        self
    }

    /// Set the request timeout in seconds.
    pub fn timeout_seconds(mut self, seconds: u64) -> Self {
        self.config.timeout_seconds = seconds;
        self
    }

    /// Set the User-Agent header value.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ProviderConfig {
        self.config
    }
}
