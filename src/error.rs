//! Error types and handling for address-autofill.

/// Result type alias for provider and widget operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for provider and widget operations.
///
/// Address extraction itself never fails; these cover everything around it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No API key was configured for a provider that needs one
    #[error("No API key configured (set GMAP_API_KEY or pass --api-key)")]
    MissingApiKey,

    /// An operation needed a loaded provider or a bound autocomplete session
    #[error("Provider not loaded: {message}")]
    ProviderNotLoaded {
        /// What was attempted
        message: String,
    },

    /// Latitude/longitude outside the valid range
    #[error("Invalid coordinates: lat={lat}, lng={lng}")]
    InvalidCoordinates {
        /// Latitude in degrees
        lat: f64,
        /// Longitude in degrees
        lng: f64,
    },

    /// Network or TLS errors. The request URL is stripped so the API key
    /// never reaches logs or messages.
    #[error("HTTP error: {source}")]
    Http {
        /// Source error
        source: reqwest::Error,
    },

    /// Non-2xx HTTP response
    #[error("Unexpected HTTP status {status} from {url}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Request URL with the API key redacted
        url: String,
    },

    /// The provider answered with an error status in its response body
    #[error("Provider returned {status}: {message}")]
    Provider {
        /// Provider status string (e.g. "REQUEST_DENIED")
        status: String,
        /// Provider error message, if any
        message: String,
    },

    /// A response or input document was not valid JSON
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        /// What was being decoded
        context: String,
        /// Source error
        #[source]
        source: serde_json::Error,
    },

    /// I/O errors
    #[error("I/O error: {source}")]
    Io {
        /// Source error
        #[from]
        source: std::io::Error,
    },

    /// Invalid configuration
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },
}

impl From<reqwest::Error> for Error {
    fn from(source: reqwest::Error) -> Self {
        Self::Http {
            source: source.without_url(),
        }
    }
}

impl Error {
    /// Create a new provider-not-loaded error
    pub fn not_loaded(message: impl Into<String>) -> Self {
        Self::ProviderNotLoaded {
            message: message.into(),
        }
    }

    /// Create a new provider status error
    pub fn provider(status: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            status: status.into(),
            message: message.into(),
        }
    }

    /// Create a new deserialization error
    pub fn deserialize(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Deserialize {
            context: context.into(),
            source,
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
