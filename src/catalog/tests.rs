//! Tests for catalog discovery and selection

use super::*;
use crate::error::Error;
use crate::streams::StreamRegistry;
use crate::types::ReplicationMethod;
use pretty_assertions::assert_eq;
use serde_json::json;

fn discovered() -> Catalog {
    Catalog::discover(&StreamRegistry::zoho_books())
}

#[test]
fn test_discover_lists_every_stream() {
    let catalog = discovered();
    assert_eq!(catalog.streams.len(), 15);
    assert!(catalog.streams.iter().all(|s| s.tap_stream_id == s.stream));
}

#[test]
fn test_discover_metadata() {
    let catalog = discovered();
    let invoices = catalog.get("invoices").unwrap();

    assert_eq!(invoices.key_properties, vec!["invoice_id".to_string()]);
    assert_eq!(
        invoices.replication_key.as_deref(),
        Some("last_modified_time")
    );
    assert_eq!(
        invoices.replication_method,
        Some(ReplicationMethod::Incremental)
    );

    let root = invoices.root_metadata().unwrap();
    assert_eq!(root.inclusion, Some(Inclusion::Available));
    assert_eq!(root.selected_by_default, Some(true));
    assert_eq!(
        root.valid_replication_keys,
        Some(vec!["last_modified_time".to_string()])
    );

    let inclusion = |name: &str| invoices.property_metadata(name).unwrap().inclusion;
    assert_eq!(inclusion("invoice_id"), Some(Inclusion::Automatic));
    assert_eq!(inclusion("last_modified_time"), Some(Inclusion::Automatic));
    assert_eq!(inclusion("customer_name"), Some(Inclusion::Available));
}

#[test]
fn test_discover_serializes_singer_keys() {
    let catalog = discovered();
    let value = serde_json::to_value(catalog.get("organization_id").unwrap()).unwrap();

    assert_eq!(value["replication_method"], "FULL_TABLE");
    assert!(value.get("replication_key").is_none());
    assert_eq!(
        value["metadata"][0],
        json!({
            "breadcrumb": [],
            "metadata": {
                "inclusion": "available",
                "selected-by-default": true,
                "table-key-properties": ["organization_id"],
                "forced-replication-method": "FULL_TABLE"
            }
        })
    );
}

#[test]
fn test_discovered_streams_are_selected() {
    let catalog = discovered();
    assert!(catalog.is_selected("invoices"));
    assert!(!catalog.is_selected("estimates"));
}

#[test]
fn test_explicit_selection_wins() {
    let catalog = Catalog::from_json(
        &json!({
            "streams": [
                {
                    "tap_stream_id": "items",
                    "stream": "items",
                    "schema": {},
                    "metadata": [{"breadcrumb": [], "metadata": {"selected": false, "selected-by-default": true}}]
                },
                {
                    "tap_stream_id": "bills",
                    "stream": "bills",
                    "schema": {},
                    "metadata": [{"breadcrumb": [], "metadata": {"selected": true}}]
                },
                {
                    "tap_stream_id": "contacts",
                    "stream": "contacts",
                    "schema": {},
                    "metadata": []
                }
            ]
        })
        .to_string(),
    )
    .unwrap();

    assert!(!catalog.is_selected("items"));
    assert!(catalog.is_selected("bills"));
    assert!(!catalog.is_selected("contacts"));
}

#[test]
fn test_select_all() {
    let mut catalog = discovered();
    catalog.select_all(false);
    assert!(!catalog.is_selected("invoices"));
    catalog.select_all(true);
    assert!(catalog.is_selected("journals"));
}

#[test]
fn test_deselected_properties() {
    let catalog = Catalog::from_json(
        &json!({
            "streams": [{
                "tap_stream_id": "contacts",
                "stream": "contacts",
                "schema": {},
                "metadata": [
                    {"breadcrumb": [], "metadata": {"selected": true}},
                    {"breadcrumb": ["properties", "email"], "metadata": {"inclusion": "available", "selected": false}},
                    {"breadcrumb": ["properties", "contact_id"], "metadata": {"inclusion": "automatic", "selected": false}},
                    {"breadcrumb": ["properties", "phone"], "metadata": {"inclusion": "available", "selected": true}}
                ]
            }]
        })
        .to_string(),
    )
    .unwrap();

    assert_eq!(
        catalog.deselected_properties("contacts"),
        vec!["email".to_string()]
    );
    assert!(catalog.deselected_properties("items").is_empty());
}

#[test]
fn test_catalog_schema_round_trip() {
    let catalog = discovered();
    let schema = catalog.schema("vendors").unwrap();
    assert!(schema.get_property("contact_id").is_some());
}

#[test]
fn test_from_file_errors() {
    let err = Catalog::from_file("/nonexistent/catalog.json").unwrap_err();
    assert!(matches!(err, Error::Catalog { .. }));

    let err = Catalog::from_json("{\"streams\": 5}").unwrap_err();
    assert!(matches!(err, Error::Catalog { .. }));
}

#[test]
fn test_unknown_metadata_keys_are_kept() {
    let catalog = Catalog::from_json(
        &json!({
            "streams": [{
                "tap_stream_id": "items",
                "stream": "items",
                "schema": {},
                "metadata": [
                    {"breadcrumb": [], "metadata": {"selected": true, "schema-name": "items"}}
                ]
            }]
        })
        .to_string(),
    )
    .unwrap();

    let entry = catalog.get("items").unwrap();
    let root = entry.root_metadata().unwrap();
    assert_eq!(root.selected, Some(true));
    assert_eq!(root.extra.get("schema-name"), Some(&json!("items")));

    let out = serde_json::to_value(&catalog).unwrap();
    assert_eq!(
        out["streams"][0]["metadata"][0]["metadata"]["schema-name"],
        json!("items")
    );
}
