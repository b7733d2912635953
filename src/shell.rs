//! Headless address widget: an input with autocomplete, a "find my location"
//! action, and the four-field address display.

use tracing::{debug, warn};

use crate::address::{NormalizedAddress, format};
use crate::error::{Error, Result};
use crate::extractor::extract;
use crate::provider::{AutocompleteSession, GeocodingProvider, Geolocator, InputHandle};
use crate::types::{PlaceRecord, Prediction};

/// Input text shown while a reverse geocode is in flight.
pub const LOCATING_TEXT: &str = "Getting your location...";

/// Address widget driven by an injected provider.
///
/// # Examples
///
/// ```rust,no_run
/// use address_autofill::{AddressWidget, Coordinates, FixedGeolocator, GoogleMapsProvider};
///
/// # async fn run() -> address_autofill::Result<()> {
/// let mut widget = AddressWidget::new(GoogleMapsProvider::from_env());
/// widget.mount().await?;
///
/// let here = FixedGeolocator::at(Coordinates::new(48.8584, 2.2945)?);
/// if let Some(address) = widget.find_my_location(&here).await?.cloned() {
///     println!("City: {}", address.city);
///     println!("{}", widget.input().value());
/// }
/// # Ok(())
/// # }
/// ```
pub struct AddressWidget<P: GeocodingProvider> {
    provider: P,
    input: Option<InputHandle>,
    autocomplete: Option<P::Autocomplete>,
    address: NormalizedAddress,
}

impl<P: GeocodingProvider> AddressWidget<P> {
    /// Create an unmounted widget with an empty input.
    pub fn new(provider: P) -> Self {
        Self::with_input(provider, InputHandle::new())
    }

    /// Create an unmounted widget bound to an existing input.
    pub fn with_input(provider: P, input: InputHandle) -> Self {
        Self {
            provider,
            input: Some(input),
            autocomplete: None,
            address: NormalizedAddress::default(),
        }
    }

    /// Load the provider, then bind autocomplete to the input.
    ///
    /// Mounting twice is harmless: a loaded provider resolves at once and the
    /// existing session is kept.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`GeocodingProvider::load_provider`] and
    /// [`GeocodingProvider::create_autocomplete`].
    pub async fn mount(&mut self) -> Result<()> {
        self.provider.load_provider().await?;

        if self.autocomplete.is_some() {
            return Ok(());
        }
        let Some(input) = &self.input else {
            debug!("input detached before autocomplete init");
            return Ok(());
        };
        self.autocomplete = Some(self.provider.create_autocomplete(input)?);
        Ok(())
    }

    /// Detach the input; later mounts skip autocomplete.
    pub fn detach_input(&mut self) -> Option<InputHandle> {
        self.autocomplete = None;
        self.input.take()
    }

    /// Whether an autocomplete session is bound.
    pub fn is_mounted(&self) -> bool {
        self.autocomplete.is_some()
    }

    /// The input handle.
    ///
    /// A detached widget returns a fresh, unconnected handle.
    pub fn input(&self) -> InputHandle {
        self.input.clone().unwrap_or_default()
    }

    /// Replace the input text, as if the user typed it.
    pub fn set_input_text(&self, text: impl Into<String>) {
        if let Some(input) = &self.input {
            input.set_value(text);
        }
    }

    /// The displayed address.
    pub fn address(&self) -> &NormalizedAddress {
        &self.address
    }

    /// The provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Suggestions for the current input text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProviderNotLoaded`] before [`AddressWidget::mount`],
    /// otherwise propagates provider errors.
    pub async fn suggestions(&self) -> Result<Vec<Prediction>> {
        self.session("suggestions")?.predictions().await
    }

    /// Resolve a chosen suggestion and display its address.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProviderNotLoaded`] before [`AddressWidget::mount`],
    /// otherwise propagates provider errors. The displayed address is left
    /// unchanged on error.
    pub async fn choose(&mut self, prediction: &Prediction) -> Result<&NormalizedAddress> {
        let place = self.session("choose")?.place_for(prediction).await?;
        self.set_input_text(prediction.description.clone());
        Ok(self.on_place_changed(place.as_ref()))
    }

    /// Display the address of a newly selected place.
    pub fn on_place_changed(&mut self, place: Option<&PlaceRecord>) -> &NormalizedAddress {
        self.address = extract(place);
        &self.address
    }

    /// Reverse geocode the user's position and display the result.
    ///
    /// Returns `Ok(None)` without touching anything when the geolocator has no
    /// position. Otherwise the input shows [`LOCATING_TEXT`] until the lookup
    /// finishes, then the formatted address.
    ///
    /// # Errors
    ///
    /// Propagates provider errors. The input then still shows
    /// [`LOCATING_TEXT`] and the displayed address is unchanged.
    pub async fn find_my_location<G: Geolocator>(
        &mut self,
        geolocator: &G,
    ) -> Result<Option<&NormalizedAddress>> {
        let Some(coords) = geolocator.current_position().await else {
            debug!("no position available");
            return Ok(None);
        };

        self.set_input_text(LOCATING_TEXT);
        let place = match self.provider.reverse_geocode(coords).await {
            Ok(place) => place,
            Err(e) => {
                warn!(%coords, error = %e, "reverse geocoding failed");
                return Err(e);
            }
        };

        let address = extract(place.as_ref());
        self.set_input_text(format(&address));
        self.address = address;
        Ok(Some(&self.address))
    }

    /// The four display lines of the current address.
    pub fn render(&self) -> String {
        render(&self.address)
    }

    fn session(&self, action: &str) -> Result<&P::Autocomplete> {
        self.autocomplete
            .as_ref()
            .ok_or_else(|| Error::not_loaded(format!("{action} before mount")))
    }
}

/// `City: …`, `State: …`, `Zip: …` and `Country: …`, one per line.
pub fn render(address: &NormalizedAddress) -> String {
    address
        .fields()
        .iter()
        .map(|(label, value)| format!("{label}: {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}
