//! The four-field address and its single-line display form.

use std::fmt;

use serde::{Deserialize, Serialize};

/// City, state, zip and country derived from a place record.
///
/// Every field defaults to the empty string when the place had no matching
/// component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NormalizedAddress {
    /// Locality (e.g. "Paris")
    pub city: String,
    /// Second-level administrative area (e.g. a county or département)
    pub state: String,
    /// Postal code (e.g. "75001")
    pub zip: String,
    /// Country name (e.g. "France")
    pub country: String,
}

impl NormalizedAddress {
    /// Check if every field is empty.
    pub fn is_empty(&self) -> bool {
        self.city.is_empty() && self.state.is_empty() && self.zip.is_empty() && self.country.is_empty()
    }

    /// Labeled fields in display order.
    pub fn fields(&self) -> [(&'static str, &str); 4] {
        [
            ("City", self.city.as_str()),
            ("State", self.state.as_str()),
            ("Zip", self.zip.as_str()),
            ("Country", self.country.as_str()),
        ]
    }
}

impl fmt::Display for NormalizedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format(self))
    }
}

/// Render an address as `city, zip, state, country`.
///
/// City, zip and state are each followed by `", "` when non-empty and skipped
/// otherwise; country is appended as-is. An address with an empty country
/// therefore keeps the separator after its last non-empty field.
///
/// # Example
///
/// ```rust
/// use address_autofill::{NormalizedAddress, format};
///
/// let address = NormalizedAddress {
///     city: "Paris".into(),
///     zip: "75001".into(),
///     country: "France".into(),
///     ..Default::default()
/// };
/// assert_eq!(format(&address), "Paris, 75001, France");
/// ```
pub fn format(address: &NormalizedAddress) -> String {
    let mut out = String::with_capacity(
        address.city.len() + address.zip.len() + address.state.len() + address.country.len() + 6,
    );
    for part in [&address.city, &address.zip, &address.state] {
        if !part.is_empty() {
            out.push_str(part);
            out.push_str(", ");
        }
    }
    out.push_str(&address.country);
    out
}
