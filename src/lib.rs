//! # address-autofill
//!
//! Address autocomplete and "find my location" backed by a mapping provider,
//! reduced to a four-field postal address.
//!
//! The heart of the crate is [`extract`], which maps a provider place record
//! to a [`NormalizedAddress`] (city, state, zip, country), and [`format`],
//! which renders it on one line. Around them sits a headless
//! [`AddressWidget`] that talks to any [`GeocodingProvider`]; the
//! [`GoogleMapsProvider`] ships for the Google Maps Platform.
//!
//! ## Quick Start
//!
//! ```rust
//! use address_autofill::{extract_value, format};
//! use serde_json::json;
//!
//! let place = json!({
//!     "address_components": [
//!         {"long_name": "Paris", "types": ["locality", "political"]},
//!         {"long_name": "75001", "types": ["postal_code"]},
//!         {"long_name": "France", "types": ["country", "political"]}
//!     ]
//! });
//!
//! let address = extract_value(&place);
//! assert_eq!(address.city, "Paris");
//! assert_eq!(format(&address), "Paris, 75001, France");
//! ```
//!
//! ## Find my location
//!
//! ```rust,no_run
//! use address_autofill::{AddressWidget, Coordinates, FixedGeolocator, GoogleMapsProvider};
//!
//! # async fn run() -> address_autofill::Result<()> {
//! let mut widget = AddressWidget::new(GoogleMapsProvider::from_env());
//! widget.mount().await?;
//! widget
//!     .find_my_location(&FixedGeolocator::at(Coordinates::new(48.8566, 2.3522)?))
//!     .await?;
//! println!("{}", widget.render());
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod address;
pub mod config;
pub mod error;
pub mod extractor;
pub mod google;
pub mod provider;
pub mod shell;
pub mod types;

// Re-export main API
pub use address::{NormalizedAddress, format};
pub use config::{ProviderConfig, ProviderConfigBuilder};
pub use error::{Error, Result};
#[cfg(feature = "parallel")]
pub use extractor::extract_batch_parallel;
pub use extractor::{extract, extract_batch, extract_value};
pub use google::{GoogleAutocomplete, GoogleMapsProvider};
pub use provider::{AutocompleteSession, FixedGeolocator, GeocodingProvider, Geolocator, InputHandle};
pub use shell::{AddressWidget, LOCATING_TEXT, render};
pub use types::*;
