//! `recordInfo` → admin metadata.

use tracing::warn;

use super::{language::read_language, read_authority};
use crate::base::XmlElement;
use crate::cocina::{AdminMetadata, Contributor, ContributorType, DescriptiveValue, Event, Source};
use crate::legacy::mods::{CATALOGING_AGENCY, RECORD_DATES, RECORD_ORIGIN, to_canonical};
use crate::vocab::Vocabulary;

pub(super) fn read(_vocab: &Vocabulary, element: &XmlElement) -> Option<AdminMetadata> {
    let mut admin = AdminMetadata::default();
    for record_info in element.children_named("recordInfo") {
        for child in record_info.elements() {
            read_child(child, &mut admin);
        }
    }
    (!admin.is_empty()).then_some(admin)
}

fn read_child(child: &XmlElement, admin: &mut AdminMetadata) {
    let name = child.local_name();
    if let Some(kind) = to_canonical(RECORD_DATES, name) {
        admin.event.push(Event {
            kind: Some(kind.to_string()),
            date: vec![DescriptiveValue {
                value: child.text_opt(),
                encoding: child.attr("encoding").map(Source::code),
                ..Default::default()
            }],
            ..Default::default()
        });
        return;
    }
    match name {
        "recordContentSource" => {
            let mut agency = DescriptiveValue::of(child.text());
            read_authority(child, &mut agency);
            admin.contributor.push(Contributor {
                kind: Some(ContributorType::Organization),
                name: vec![agency],
                role: vec![DescriptiveValue::of(CATALOGING_AGENCY)],
                ..Default::default()
            });
        }
        "recordIdentifier" => admin.identifier.push(DescriptiveValue {
            value: child.text_opt(),
            source: child.attr("source").map(Source::value),
            ..Default::default()
        }),
        "recordOrigin" => admin.note.push(DescriptiveValue::typed(child.text(), RECORD_ORIGIN)),
        "recordInfoNote" => admin.note.push(DescriptiveValue {
            value: child.text_opt(),
            kind: child.attr("type").map(str::to_string),
            ..Default::default()
        }),
        "languageOfCataloging" => admin.language.push(read_language(child)),
        "descriptionStandard" => admin.metadata_standard.push(Source::code(child.text())),
        other => warn!(element = other, "unmapped recordInfo child dropped"),
    }
}
