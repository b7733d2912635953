//! Seams between the widget shell and the outside world.
//!
//! A [`GeocodingProvider`] stands in for the mapping platform: it is loaded
//! once, binds autocomplete sessions to an input, and reverse geocodes
//! coordinates. A [`Geolocator`] supplies the user's position. Both are
//! injected so the shell runs against a fake just as well as a live service.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::Result;
use crate::types::{Coordinates, PlaceRecord, Prediction};

/// A mapping/geocoding service.
pub trait GeocodingProvider: Send + Sync {
    /// Session type returned by [`GeocodingProvider::create_autocomplete`].
    type Autocomplete: AutocompleteSession;

    /// Prepare the provider for use. Resolves immediately when already loaded.
    fn load_provider(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Whether [`GeocodingProvider::load_provider`] has completed.
    fn is_loaded(&self) -> bool;

    /// Bind an autocomplete session to an input.
    ///
    /// Sessions only resolve address components and geometry.
    fn create_autocomplete(&self, input: &InputHandle) -> Result<Self::Autocomplete>;

    /// Look up the most specific place at the given coordinates.
    ///
    /// Returns `Ok(None)` when the provider has nothing there.
    fn reverse_geocode(
        &self,
        coords: Coordinates,
    ) -> impl Future<Output = Result<Option<PlaceRecord>>> + Send;
}

/// Suggestions for a bound input, and their resolution into places.
pub trait AutocompleteSession: Send + Sync {
    /// Suggestions for the input's current text. Empty input yields no suggestions.
    fn predictions(&self) -> impl Future<Output = Result<Vec<Prediction>>> + Send;

    /// Resolve a suggestion into a place record.
    fn place_for(
        &self,
        prediction: &Prediction,
    ) -> impl Future<Output = Result<Option<PlaceRecord>>> + Send;
}

/// Source of the user's current position.
pub trait Geolocator: Send + Sync {
    /// The current position, or `None` when geolocation is unavailable or denied.
    fn current_position(&self) -> impl Future<Output = Option<Coordinates>> + Send;
}

/// Geolocator that always reports the same position (or none).
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedGeolocator(pub Option<Coordinates>);

impl FixedGeolocator {
    /// A geolocator reporting `coords`.
    pub fn at(coords: Coordinates) -> Self {
        Self(Some(coords))
    }

    /// A geolocator with no position available.
    pub fn unavailable() -> Self {
        Self(None)
    }
}

impl Geolocator for FixedGeolocator {
    async fn current_position(&self) -> Option<Coordinates> {
        self.0
    }
}

/// Shared handle to the text of an input field.
///
/// Clones refer to the same text, so the widget and any autocomplete session
/// bound to it see each other's writes.
#[derive(Debug, Clone, Default)]
pub struct InputHandle {
    text: Arc<Mutex<String>>,
}

impl InputHandle {
    /// An empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text.
    pub fn value(&self) -> String {
        self.text.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Replace the text.
    pub fn set_value(&self, value: impl Into<String>) {
        *self.text.lock().unwrap_or_else(PoisonError::into_inner) = value.into();
    }
}
