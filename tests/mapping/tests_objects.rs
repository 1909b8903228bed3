#![allow(clippy::unwrap_used)]

use cocina::{Datastream, FromLegacy, MappingError, RepositoryObject, ToLegacy};
use serde_json::{Value, json};

use crate::helpers::fixtures::{self, DRUID};

fn minimal_item() -> Value {
    json!({
        "type": "https://cocina.sul.stanford.edu/models/image",
        "externalIdentifier": DRUID,
        "label": "Stanford Dish",
        "version": 1,
        "access": {"view": "world", "download": "world"},
        "administrative": {"hasAdminPolicy": "druid:hv992ry2431"},
        "description": {"title": [{"value": "Stanford Dish"}]},
        "identification": {"sourceId": "sul:dish-1"}
    })
}

#[test]
fn test_valid_object_is_accepted() {
    let object = RepositoryObject::from_value(minimal_item()).unwrap();
    assert_eq!(object.external_identifier(), DRUID);
    assert_eq!(object.label(), "Stanford Dish");
}

#[test]
fn test_missing_field_is_a_schema_violation() {
    let mut value = minimal_item();
    value.as_object_mut().unwrap().remove("administrative");
    let err = RepositoryObject::from_value(value).unwrap_err();
    assert!(matches!(err, MappingError::SchemaViolation { .. }));
}

#[test]
fn test_bad_identifier_is_a_schema_violation() {
    let mut value = minimal_item();
    value["externalIdentifier"] = json!("bc123df4567");
    let err = RepositoryObject::from_value(value).unwrap_err();
    assert!(matches!(err, MappingError::SchemaViolation { ref path, .. } if path == "/externalIdentifier"));
}

#[test]
fn test_build_object_from_every_datastream() {
    let object = FromLegacy::default().build(&fixtures::legacy_object()).unwrap();
    object.validate().unwrap();
    assert_eq!(object.external_identifier(), DRUID);
    assert_eq!(object.label(), "Stanford Dish");
    let access = object.access().unwrap();
    assert!(access.embargo.is_some());
    let description = object.description().unwrap();
    assert_eq!(description.title[0].value.as_deref(), Some("Stanford Dish"));
    assert_eq!(description.contributor.len(), 1);
}

#[test]
fn test_written_object_reads_back_the_same() {
    let legacy = fixtures::legacy_object();
    let object = FromLegacy::default().build(&legacy).unwrap();
    let written = ToLegacy::default().write_object(&object).unwrap();
    for datastream in Datastream::ALL {
        assert!(written.get(datastream).is_some(), "{} missing", datastream.name());
    }
    let reread = FromLegacy::default().build(&written).unwrap();
    assert_eq!(reread.description(), object.description());
    assert_eq!(reread.access(), object.access());
}
