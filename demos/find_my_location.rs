//! "Find my location" example.
//!
//! Reverse geocodes a fixed position through the Google Maps Platform and
//! prints the resulting address. Needs `GMAP_API_KEY` in the environment.
//!
//! Run with: cargo run --example find_my_location -- 48.8584 2.2945

use address_autofill::{AddressWidget, Coordinates, Error, FixedGeolocator, GoogleMapsProvider};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let mut args = std::env::args().skip(1).map(|a| a.parse::<f64>());
    let (lat, lng) = match (args.next(), args.next()) {
        (Some(Ok(lat)), Some(Ok(lng))) => (lat, lng),
        _ => (48.8584, 2.2945),
    };

    let mut widget = AddressWidget::new(GoogleMapsProvider::from_env());

    println!("Loading provider...");
    match widget.mount().await {
        Ok(()) => {}
        Err(Error::MissingApiKey) => {
            println!("Set GMAP_API_KEY to run this example.");
            return Ok(());
        }
        Err(e) => return Err(e),
    }

    let here = FixedGeolocator::at(Coordinates::new(lat, lng)?);
    if widget.find_my_location(&here).await?.is_some() {
        println!("{}", widget.render());
        println!("\nInput: {}", widget.input().value());
    } else {
        println!("No position available");
    }

    Ok(())
}
