#![allow(clippy::unwrap_used)]

use cocina::roundtrip::{verify, verify_all};
use cocina::{MappingError, RoundtripValidator, XmlElement};
use rstest::rstest;

use crate::helpers::fixtures::{self, DRUID};

#[rstest]
#[case::identity(fixtures::IDENTITY)]
#[case::rights(fixtures::RIGHTS)]
#[case::embargo(fixtures::EMBARGO)]
#[case::content(fixtures::CONTENT)]
#[case::descriptive(fixtures::MODS)]
#[case::relationships(fixtures::RELS_EXT)]
#[case::parallel_names(fixtures::MODS_PARALLEL_NAMES)]
#[case::parallel_events(fixtures::MODS_PARALLEL_EVENTS)]
#[case::related_part(fixtures::MODS_RELATED_PART)]
#[case::unmapped_elements(fixtures::MODS_UNMAPPED)]
#[case::date_range(fixtures::MODS_DATE_RANGE)]
#[case::name_title(fixtures::MODS_NAME_TITLE)]
#[case::record_info(fixtures::MODS_RECORD_INFO)]
fn test_datastream_round_trips(#[case] xml: &str) {
    let document = fixtures::parse(xml);
    let result = RoundtripValidator::default().check(&document, DRUID);
    assert!(result.is_ok(), "{result:?}");
    assert!(verify(&document, DRUID));
}

#[rstest]
#[case::within_limit(3)]
#[case::past_limit(20)]
fn test_nested_related_items_round_trip(#[case] levels: usize) {
    let document = fixtures::parse(&fixtures::nested_related(levels));
    let result = RoundtripValidator::default().check(&document, DRUID);
    assert!(result.is_ok(), "{result:?}");
}

#[test]
fn test_verify_all_reports_each_object() {
    let objects = vec![fixtures::legacy_object(), fixtures::legacy_object()];
    let reports = verify_all(&objects);
    assert_eq!(reports.len(), 2);
    for report in &reports {
        assert_eq!(report.pid, DRUID);
        assert_eq!(report.results.len(), 6);
        assert!(report.passed(), "{:?}", report.failures().collect::<Vec<_>>());
    }
}

#[test]
fn test_unreadable_document_is_fatal() {
    let document = XmlElement::parse(
        "<identityMetadata><objectType>workflow</objectType></identityMetadata>",
    )
    .unwrap();
    let err = RoundtripValidator::default().check(&document, DRUID).unwrap_err();
    assert!(matches!(err, MappingError::UnmappableDocument { .. }));
    assert!(err.is_fatal());
}

#[test]
fn test_non_numeric_file_size_is_fatal() {
    let document = fixtures::parse(&fixtures::CONTENT.replace("3575822", "3.4 MB"));
    let err = RoundtripValidator::default().check(&document, DRUID).unwrap_err();
    assert!(matches!(err, MappingError::UnmappableDocument { .. }));
}
