#![allow(clippy::unwrap_used)]

use cocina::{Normalizer, XmlElement, normalize};
use rstest::rstest;

use crate::helpers::fixtures::{self, DRUID};

#[test]
fn test_normalization_is_idempotent() {
    let deep = fixtures::nested_related(20);
    let mut documents: Vec<&str> = fixtures::ALL.to_vec();
    documents.extend(fixtures::MODS_SHAPES);
    documents.push(&deep);
    for xml in documents {
        let once = normalize(&fixtures::parse(xml), DRUID);
        let twice = normalize(&once, DRUID);
        assert_eq!(once.describe_difference(&twice), None, "not a fixed point:\n{xml}");
    }
}

#[test]
fn test_unmapped_mods_elements_are_dropped() {
    let mods = normalize(&fixtures::parse(fixtures::MODS_UNMAPPED), DRUID);
    assert!(mods.child("extension").is_none());
    assert!(mods.child("part").is_some());
    assert!(mods.child("relatedItem").unwrap().child("extension").is_none());
}

#[test]
fn test_namespace_declarations_are_stripped() {
    let mods = normalize(&fixtures::parse(fixtures::MODS), DRUID);
    assert!(!mods.has_attr("xmlns"));
    assert_eq!(mods.attr("version"), Some("3.7"));
}

#[test]
fn test_identity_drops_unmapped_elements() {
    let identity = normalize(&fixtures::parse(fixtures::IDENTITY), DRUID);
    assert!(identity.child("objectCreator").is_none());
    assert!(identity.child("tag").is_none());
    let names: Vec<_> = identity.children_named("otherId").map(|o| o.attr("name")).collect();
    assert_eq!(names, vec![Some("catkey"), Some("barcode")]);
}

#[rstest]
#[case("Isbn", "isbn")]
#[case("Oclc", "OCLC")]
#[case("Xyz", "Xyz")]
fn test_identifier_types_canonicalized(#[case] given: &str, #[case] expected: &str) {
    let xml = format!(r#"<mods><identifier type="{given}">1234</identifier></mods>"#);
    let mods = Normalizer::default().normalize(&XmlElement::parse(&xml).unwrap(), DRUID);
    assert_eq!(mods.child("identifier").unwrap().attr("type"), Some(expected));
}

#[test]
fn test_object_id_is_rewritten() {
    let content = normalize(
        &XmlElement::parse(r#"<contentMetadata objectId="bc123df4567" type="image"/>"#).unwrap(),
        DRUID,
    );
    assert_eq!(content.attr("objectId"), Some(DRUID));
}
