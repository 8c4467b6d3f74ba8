//! Integration tests for parsing Postmaster responses.
//!
//! These tests validate that the postmaster models deserialize recorded API
//! payloads, including fields the models do not type explicitly.

use postmaster::{AddressValidation, Package, Page, Payload, Shipment};
use postmaster_core::decode_response;
use std::fs;
use std::path::PathBuf;

/// Get the path to the test fixtures directory.
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Load a fixture from disk.
fn load_fixture(name: &str) -> String {
    let fixture_path = fixtures_dir().join(name);
    fs::read_to_string(&fixture_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read fixture at {}: {}",
            fixture_path.display(),
            e
        )
    })
}

#[test]
fn test_deserialize_international_shipment() {
    let json_data = load_fixture("shipment_detail.json");

    let shipment: Shipment = serde_json::from_str(&json_data)
        .unwrap_or_else(|e| panic!("Failed to deserialize shipment: {}\nJSON: {}", e, json_data));

    assert_eq!(shipment.id, 5_629_499_534_213_120);
    assert_eq!(shipment.service.as_deref(), Some("INTL_PRIORITY"));

    let to = shipment.to.as_ref().expect("shipment has a recipient");
    assert_eq!(to.country.as_deref(), Some("PL"));

    let customs = shipment.packages[0]
        .customs
        .as_ref()
        .expect("international package carries customs");
    assert_eq!(customs.kind, "Gift");
    assert_eq!(customs.contents[0].value, "15");
    assert_eq!(customs.contents[0].quantity, 1);

    // Untyped fields survive in the flattened map.
    assert_eq!(shipment.extra["cost"], 5230);
    assert!(shipment.packages[0].extra.contains_key("label_url"));
}

#[test]
fn test_decoded_shipment_matches_direct_parse() {
    let json_data = load_fixture("shipment_detail.json");

    let decoded = decode_response(200, &json_data).expect("2xx decodes");
    assert!(matches!(decoded.payload, Payload::Json(_)));

    let via_transport: Shipment = decoded.payload.deserialize().unwrap();
    let direct: Shipment = serde_json::from_str(&json_data).unwrap();
    assert_eq!(via_transport, direct);
}

#[test]
fn test_deserialize_package_page() {
    let json_data = load_fixture("package_list.json");

    let page: Page<Package> = serde_json::from_str(&json_data)
        .unwrap_or_else(|e| panic!("Failed to deserialize package page: {}", e));

    assert_eq!(page.results.len(), 3, "Expected 3 packages in test data");
    assert_eq!(page.cursor.as_deref(), Some("Cg8SCVBhY2thZ2UYZwwYASAA"));
    assert_eq!(page.previous_cursor.as_deref(), Some(""));

    let first = &page.results[0];
    assert_eq!(first.name.as_deref(), Some("small box"));
    assert!((first.weight - 10.0).abs() < f64::EPSILON);

    let metric = &page.results[2];
    assert_eq!(metric.weight_units, "KG");
    assert_eq!(metric.dimension_units, "CM");
    assert!(metric.extra.contains_key("created_at"));
}

#[test]
fn test_deserialize_address_validation() {
    let json_data = load_fixture("address_validation.json");

    let validation: AddressValidation = serde_json::from_str(&json_data).unwrap();
    assert_eq!(validation.status.as_deref(), Some("OK"));
    assert_eq!(validation.addresses.len(), 1);
    assert_eq!(validation.addresses[0].zip_code, "78704-4429");
    assert_eq!(validation.addresses[0].residential, Some(false));
    assert!(validation.extra.contains_key("confidence"));
}
