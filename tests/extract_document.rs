//! Offline extraction from saved provider documents.

use std::io::Write;

use assert_matches::assert_matches;
use tempfile::NamedTempFile;

use address_autofill::{Error, NormalizedAddress, extract, format, load_place_document};

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("failed to write temp file");
    file
}

#[test]
fn extracts_from_saved_geocode_response() {
    let file = write_temp(
        r#"{
            "status": "OK",
            "results": [{
                "address_components": [
                    {"long_name": "Paris", "short_name": "Paris", "types": ["locality", "political"]},
                    {"long_name": "75001", "short_name": "75001", "types": ["postal_code"]},
                    {"long_name": "France", "short_name": "FR", "types": ["country", "political"]}
                ]
            }]
        }"#,
    );

    let place = load_place_document(file.path()).unwrap();
    let address = extract(place.as_ref());

    assert_eq!(format(&address), "Paris, 75001, France");
}

#[test]
fn extracts_from_saved_place_record() {
    let file = write_temp(
        r#"{"address_components": [{"long_name": "Tokyo", "types": ["locality"]}]}"#,
    );

    let place = load_place_document(file.path()).unwrap();
    assert_eq!(extract(place.as_ref()).city, "Tokyo");
}

#[test]
fn empty_results_extract_to_default() {
    let file = write_temp(r#"{"status": "ZERO_RESULTS", "results": []}"#);

    let place = load_place_document(file.path()).unwrap();
    assert!(place.is_none());
    assert_eq!(extract(place.as_ref()), NormalizedAddress::default());
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_place_document(&dir.path().join("missing.json"));
    assert_matches!(result, Err(Error::Io { .. }));
}

#[test]
fn invalid_json_is_deserialize_error() {
    let file = write_temp("{ not json");
    let result = load_place_document(file.path());
    assert_matches!(result, Err(Error::Deserialize { context, .. }) => {
        assert_eq!(context, file.path().display().to_string());
    });
}
