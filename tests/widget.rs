//! Widget shell tests against an in-memory provider.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use assert_matches::assert_matches;

use address_autofill::{
    AddressComponent, AddressWidget, AutocompleteSession, Coordinates, Error, FixedGeolocator,
    GeocodingProvider, InputHandle, LOCATING_TEXT, NormalizedAddress, PlaceRecord, Prediction,
    Result,
};

/// Provider answering from fixed data, counting loads and lookups.
#[derive(Clone, Default)]
struct FakeProvider {
    loaded: bool,
    loads: Arc<AtomicUsize>,
    lookups: Arc<AtomicUsize>,
    reverse: Option<PlaceRecord>,
    fail_reverse: bool,
    places: Vec<(Prediction, PlaceRecord)>,
}

struct FakeAutocomplete {
    input: InputHandle,
    places: Vec<(Prediction, PlaceRecord)>,
}

impl GeocodingProvider for FakeProvider {
    type Autocomplete = FakeAutocomplete;

    async fn load_provider(&mut self) -> Result<()> {
        if !self.loaded {
            self.loads.fetch_add(1, Ordering::SeqCst);
            self.loaded = true;
        }
        Ok(())
    }

    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn create_autocomplete(&self, input: &InputHandle) -> Result<FakeAutocomplete> {
        if !self.loaded {
            return Err(Error::not_loaded("create_autocomplete"));
        }
        Ok(FakeAutocomplete {
            input: input.clone(),
            places: self.places.clone(),
        })
    }

    async fn reverse_geocode(&self, _coords: Coordinates) -> Result<Option<PlaceRecord>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail_reverse {
            return Err(Error::provider("OVER_QUERY_LIMIT", "quota exceeded"));
        }
        Ok(self.reverse.clone())
    }
}

impl AutocompleteSession for FakeAutocomplete {
    async fn predictions(&self) -> Result<Vec<Prediction>> {
        let text = self.input.value().to_lowercase();
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .places
            .iter()
            .filter(|(p, _)| p.description.to_lowercase().starts_with(&text))
            .map(|(p, _)| p.clone())
            .collect())
    }

    async fn place_for(&self, prediction: &Prediction) -> Result<Option<PlaceRecord>> {
        Ok(self
            .places
            .iter()
            .find(|(p, _)| p.place_id == prediction.place_id)
            .map(|(_, place)| place.clone()))
    }
}

fn prediction(description: &str, place_id: &str) -> Prediction {
    Prediction {
        description: description.to_string(),
        place_id: place_id.to_string(),
    }
}

fn springfield() -> PlaceRecord {
    PlaceRecord::with_components(vec![
        AddressComponent::new("Springfield", ["locality", "political"]),
        AddressComponent::new("Sangamon County", ["administrative_area_level_2", "political"]),
        AddressComponent::new("Illinois", ["administrative_area_level_1", "political"]),
        AddressComponent::new("United States", ["country", "political"]),
        AddressComponent::new("62701", ["postal_code"]),
    ])
}

fn berlin() -> PlaceRecord {
    PlaceRecord::with_components(vec![
        AddressComponent::new("Berlin", ["locality", "political"]),
        AddressComponent::new("Germany", ["country", "political"]),
    ])
}

fn here() -> FixedGeolocator {
    FixedGeolocator::at(Coordinates::new(39.7817, -89.6501).unwrap())
}

#[tokio::test]
async fn mount_loads_once_and_binds_autocomplete() {
    let provider = FakeProvider::default();
    let loads = Arc::clone(&provider.loads);
    let mut widget = AddressWidget::new(provider);

    assert!(!widget.is_mounted());
    widget.mount().await.unwrap();
    widget.mount().await.unwrap();

    assert!(widget.is_mounted());
    assert!(widget.provider().is_loaded());
    assert_eq!(loads.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn mount_without_input_skips_autocomplete() {
    let mut widget = AddressWidget::new(FakeProvider::default());
    widget.detach_input();
    widget.mount().await.unwrap();

    assert!(widget.provider().is_loaded());
    assert!(!widget.is_mounted());
}

#[tokio::test]
async fn suggestions_before_mount_is_an_error() {
    let widget = AddressWidget::new(FakeProvider::default());
    assert_matches!(widget.suggestions().await, Err(Error::ProviderNotLoaded { .. }));
}

#[tokio::test]
async fn choosing_a_suggestion_displays_its_address() {
    let provider = FakeProvider {
        places: vec![
            (prediction("Springfield, IL, USA", "spi"), springfield()),
            (prediction("Berlin, Germany", "ber"), berlin()),
        ],
        ..Default::default()
    };
    let mut widget = AddressWidget::new(provider);
    widget.mount().await.unwrap();

    widget.set_input_text("spr");
    let suggestions = widget.suggestions().await.unwrap();
    assert_eq!(suggestions, vec![prediction("Springfield, IL, USA", "spi")]);

    let address = widget.choose(&suggestions[0]).await.unwrap().clone();
    assert_eq!(
        address,
        NormalizedAddress {
            city: "Springfield".to_string(),
            state: "Sangamon County".to_string(),
            zip: "62701".to_string(),
            country: "United States".to_string(),
        }
    );
    assert_eq!(widget.input().value(), "Springfield, IL, USA");
}

#[tokio::test]
async fn choosing_an_unknown_suggestion_clears_the_display() {
    let provider = FakeProvider {
        places: vec![(prediction("Berlin, Germany", "ber"), berlin())],
        ..Default::default()
    };
    let mut widget = AddressWidget::new(provider);
    widget.mount().await.unwrap();

    widget.choose(&prediction("Berlin, Germany", "ber")).await.unwrap();
    assert_eq!(widget.address().city, "Berlin");

    widget.choose(&prediction("Nowhere", "zzz")).await.unwrap();
    assert!(widget.address().is_empty());
}

#[tokio::test]
async fn find_my_location_writes_formatted_address_into_input() {
    let provider = FakeProvider {
        reverse: Some(springfield()),
        ..Default::default()
    };
    let mut widget = AddressWidget::new(provider);
    widget.mount().await.unwrap();

    let address = widget.find_my_location(&here()).await.unwrap().cloned();

    assert_eq!(address.unwrap().city, "Springfield");
    assert_eq!(
        widget.input().value(),
        "Springfield, 62701, Sangamon County, United States"
    );
    assert_eq!(
        widget.render(),
        "City: Springfield\nState: Sangamon County\nZip: 62701\nCountry: United States"
    );
}

#[tokio::test]
async fn find_my_location_without_position_changes_nothing() {
    let provider = FakeProvider {
        reverse: Some(springfield()),
        ..Default::default()
    };
    let lookups = Arc::clone(&provider.lookups);
    let mut widget = AddressWidget::new(provider);
    widget.mount().await.unwrap();
    widget.set_input_text("typed");

    let result = widget
        .find_my_location(&FixedGeolocator::unavailable())
        .await
        .unwrap();

    assert!(result.is_none());
    assert_eq!(widget.input().value(), "typed");
    assert_eq!(lookups.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn find_my_location_with_no_result_shows_empty_address() {
    let mut widget = AddressWidget::new(FakeProvider::default());
    widget.mount().await.unwrap();
    widget.on_place_changed(Some(&berlin()));

    widget.find_my_location(&here()).await.unwrap();

    assert!(widget.address().is_empty());
    assert_eq!(widget.input().value(), "");
}

#[tokio::test]
async fn find_my_location_failure_leaves_progress_text() {
    let provider = FakeProvider {
        fail_reverse: true,
        ..Default::default()
    };
    let mut widget = AddressWidget::new(provider);
    widget.mount().await.unwrap();
    widget.on_place_changed(Some(&berlin()));

    let result = widget.find_my_location(&here()).await.map(|a| a.cloned());

    assert_matches!(result, Err(Error::Provider { .. }));
    assert_eq!(widget.input().value(), LOCATING_TEXT);
    assert_eq!(widget.address().city, "Berlin");
}

#[tokio::test]
async fn city_only_location_keeps_trailing_separator() {
    let provider = FakeProvider {
        reverse: Some(PlaceRecord::with_components(vec![AddressComponent::new(
            "Vatican City",
            ["locality"],
        )])),
        ..Default::default()
    };
    let mut widget = AddressWidget::new(provider);
    widget.mount().await.unwrap();

    widget.find_my_location(&here()).await.unwrap();
    assert_eq!(widget.input().value(), "Vatican City, ");
}
