#![allow(clippy::unwrap_used)]

use cocina::datacite::{DateType, NameType, PUBLISHER};
use cocina::{DataciteProjector, FromLegacy, MappingError, RepositoryObject};
use serde_json::{Value, json};

use crate::helpers::fixtures::{self, DRUID};

fn item(access: Value, description: Value) -> RepositoryObject {
    RepositoryObject::from_value(json!({
        "type": "https://cocina.sul.stanford.edu/models/object",
        "externalIdentifier": DRUID,
        "label": "Stanford Dish",
        "version": 1,
        "access": access,
        "administrative": {"hasAdminPolicy": "druid:hv992ry2431"},
        "description": description,
        "identification": {"sourceId": "hydrus:object-1"}
    }))
    .unwrap()
}

#[test]
fn test_mapped_object_projects() {
    let object = FromLegacy::default().build(&fixtures::legacy_object()).unwrap();
    let attributes = DataciteProjector::default().project(&object).unwrap().unwrap();
    assert_eq!(attributes.publisher, PUBLISHER);
    assert_eq!(attributes.url.as_deref(), Some("https://purl.stanford.edu/bc123df4567"));
    assert_eq!(attributes.titles[0].title, "Stanford Dish");
    assert_eq!(attributes.creators[0].name, "Stanford, Jane");
    assert_eq!(attributes.creators[0].name_type, NameType::Personal);
    assert_eq!(attributes.publication_year.as_deref(), Some("2029"));
    assert!(
        attributes
            .dates
            .iter()
            .any(|date| date.date_type == DateType::Available && date.date == "2029-02-28")
    );
}

#[test]
fn test_type_only_related_resource_is_omitted() {
    let object = item(
        json!({"view": "world", "download": "world"}),
        json!({
            "title": [{"value": "Stanford Dish"}],
            "relatedResource": [
                {"type": "references"},
                {"type": "has part", "title": [{"value": "Dish, part 2"}]}
            ]
        }),
    );
    let attributes = DataciteProjector::default().project(&object).unwrap().unwrap();
    assert_eq!(attributes.related_items.len(), 1);
    assert_eq!(attributes.related_items[0].relation_type, "HasPart");
    assert!(attributes.related_identifiers.is_empty());
}

#[test]
fn test_publication_year_prefers_embargo_release() {
    let description = json!({
        "title": [{"value": "Stanford Dish"}],
        "event": [{"type": "deposit", "date": [{"value": "2021-03-07"}]}]
    });
    let embargoed = item(
        json!({
            "view": "citation-only",
            "download": "none",
            "embargo": {"releaseDate": "2022-03-07T00:00:00Z", "view": "world", "download": "world"}
        }),
        description.clone(),
    );
    let open = item(json!({"view": "world", "download": "world"}), description);

    let projector = DataciteProjector::default();
    let year = |object: &RepositoryObject| {
        projector.project(object).unwrap().unwrap().publication_year
    };
    assert_eq!(year(&embargoed).as_deref(), Some("2022"));
    assert_eq!(year(&open).as_deref(), Some("2021"));
}

#[test]
fn test_affiliation_identifier_takes_precedence() {
    let affiliation = |with_ror: bool| {
        let mut institution = json!({"value": "Stanford University"});
        if with_ror {
            institution["identifier"] = json!([{"uri": "https://ror.org/00f54p054", "type": "ROR"}]);
        }
        json!({"structuredValue": [institution, {"value": "Woods Institute"}]})
    };
    let object = item(
        json!({"view": "world", "download": "world"}),
        json!({
            "title": [{"value": "Stanford Dish"}],
            "contributor": [
                {
                    "name": [{"value": "Stanford, Jane"}],
                    "type": "person",
                    "status": "primary",
                    "affiliation": [affiliation(true)]
                },
                {
                    "name": [{"value": "Stanford, Leland"}],
                    "type": "person",
                    "affiliation": [affiliation(false)]
                }
            ]
        }),
    );
    let attributes = DataciteProjector::default().project(&object).unwrap().unwrap();
    let first = &attributes.creators[0].affiliation[0];
    assert_eq!(first.name, "Stanford University");
    assert_eq!(first.affiliation_identifier.as_deref(), Some("https://ror.org/00f54p054"));
    assert_eq!(first.affiliation_identifier_scheme.as_deref(), Some("ROR"));
    let second = &attributes.creators[1].affiliation[0];
    assert_eq!(second.name, "Stanford University, Woods Institute");
    assert!(second.affiliation_identifier.is_none());
}

#[test]
fn test_agreement_is_not_registered() {
    let agreement = RepositoryObject::from_value(json!({
        "type": "https://cocina.sul.stanford.edu/models/agreement",
        "externalIdentifier": DRUID,
        "label": "Deposit agreement",
        "version": 1,
        "access": {"view": "dark"},
        "administrative": {"hasAdminPolicy": "druid:hv992ry2431"},
        "description": {"title": [{"value": "Deposit agreement"}]},
        "identification": {"sourceId": "sul:agreement-1"}
    }))
    .unwrap();
    let err = DataciteProjector::default().project(&agreement).unwrap_err();
    assert!(matches!(err, MappingError::UnsupportedObjectType(_)));
}
