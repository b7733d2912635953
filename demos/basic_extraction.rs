//! Basic address extraction example
//!
//! This example extracts the four address fields from a few place records
//! shaped like geocoding results, without touching the network.
//!
//! Run with: cargo run --example basic_extraction

use address_autofill::{extract_value, format, render};
use serde_json::json;

fn main() {
    println!("address-autofill Basic Extraction Example");
    println!("=========================================");

    let places = vec![
        json!({
            "address_components": [
                {"long_name": "Paris", "types": ["locality", "political"]},
                {"long_name": "Paris", "types": ["administrative_area_level_2", "political"]},
                {"long_name": "75001", "types": ["postal_code"]},
                {"long_name": "France", "types": ["country", "political"]}
            ]
        }),
        json!({
            "address_components": [
                {"long_name": "Tokyo", "types": ["locality", "political"]},
                {"long_name": "Japan", "types": ["country", "political"]}
            ]
        }),
        // Nothing usable: every field stays empty.
        json!({"geometry": {"location": {"lat": 0.0, "lng": 0.0}}}),
    ];

    for place in &places {
        let address = extract_value(place);
        println!("\n{}", render(&address));
        println!("Input text: {:?}", format(&address));
    }

    println!("\nExample complete!");
}
