//! Extraction of the four address fields from a place record.

use serde_json::Value;

use crate::address::NormalizedAddress;
use crate::types::{AddressComponent, PlaceRecord};

/// Type tag whose component fills [`NormalizedAddress::city`].
pub const CITY_TYPE: &str = "locality";
/// Type tag whose component fills [`NormalizedAddress::state`].
pub const STATE_TYPE: &str = "administrative_area_level_2";
/// Type tag whose component fills [`NormalizedAddress::zip`].
pub const ZIP_TYPE: &str = "postal_code";
/// Type tag whose component fills [`NormalizedAddress::country`].
pub const COUNTRY_TYPE: &str = "country";

/// Extract city, state, zip and country from a place record.
///
/// Components are visited in order and every rule a component matches is
/// applied, so a later component overwrites an earlier one for the same field.
/// A missing place, or one without a component list, yields the empty address.
///
/// # Example
///
/// ```rust
/// use address_autofill::{AddressComponent, PlaceRecord, extract};
///
/// let place = PlaceRecord::with_components(vec![
///     AddressComponent::new("Paris", ["locality"]),
///     AddressComponent::new("75001", ["postal_code"]),
///     AddressComponent::new("France", ["country"]),
/// ]);
///
/// let address = extract(Some(&place));
/// assert_eq!(address.city, "Paris");
/// assert_eq!(address.zip, "75001");
/// assert_eq!(address.state, "");
/// ```
pub fn extract(place: Option<&PlaceRecord>) -> NormalizedAddress {
    let mut address = NormalizedAddress::default();

    let Some(components) = place.and_then(|p| p.address_components.as_deref()) else {
        return address;
    };

    for component in components {
        apply_component(&mut address, component);
    }

    address
}

/// Extract from raw JSON, treating anything that is not a place object as absent.
pub fn extract_value(value: &Value) -> NormalizedAddress {
    extract(PlaceRecord::from_value(value).as_ref())
}

/// Extract many places, preserving input order.
pub fn extract_batch(places: &[PlaceRecord]) -> Vec<NormalizedAddress> {
    places.iter().map(|place| extract(Some(place))).collect()
}

/// Extract many places across threads, preserving input order.
#[cfg(feature = "parallel")]
pub fn extract_batch_parallel(places: &[PlaceRecord]) -> Vec<NormalizedAddress> {
    use rayon::prelude::*;

    places.par_iter().map(|place| extract(Some(place))).collect()
}

fn apply_component(address: &mut NormalizedAddress, component: &AddressComponent) {
    let value = &component.long_name;

    if component.has_type(CITY_TYPE) {
        address.city.clone_from(value);
    }
    if component.has_type(STATE_TYPE) {
        address.state.clone_from(value);
    }
    if component.has_type(ZIP_TYPE) {
        address.zip.clone_from(value);
    }
    if component.has_type(COUNTRY_TYPE) {
        address.country.clone_from(value);
    }
}
