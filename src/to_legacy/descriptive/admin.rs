//! admin metadata → `recordInfo`.

use tracing::warn;

use super::{set_authority, write_language};
use crate::base::XmlElement;
use crate::cocina::AdminMetadata;
use crate::legacy::mods::{CATALOGING_AGENCY, RECORD_DATES, RECORD_ORIGIN, to_mods};
use crate::vocab::Vocabulary;

pub(super) fn write(_vocab: &Vocabulary, admin: &AdminMetadata) -> XmlElement {
    let mut record_info = XmlElement::new("recordInfo");

    for contributor in &admin.contributor {
        if !contributor.has_role(CATALOGING_AGENCY, "") {
            warn!("record contributor other than the cataloging agency dropped");
            continue;
        }
        for name in &contributor.name {
            if let Some(text) = &name.value {
                let mut source = XmlElement::text_element("recordContentSource", text.clone());
                set_authority(&mut source, name);
                record_info.push_child(source);
            }
        }
    }
    for event in &admin.event {
        let Some(element) = event.kind.as_deref().and_then(|kind| to_mods(RECORD_DATES, kind)) else {
            warn!(kind = event.kind.as_deref(), "record event without a MODS element dropped");
            continue;
        };
        for date in &event.date {
            if let Some(text) = &date.value {
                record_info.push_child(
                    XmlElement::text_element(element, text.clone())
                        .with_opt_attr("encoding", date.encoding_code()),
                );
            }
        }
    }
    for identifier in &admin.identifier {
        if let Some(text) = &identifier.value {
            record_info.push_child(
                XmlElement::text_element("recordIdentifier", text.clone())
                    .with_opt_attr("source", identifier.source_value()),
            );
        }
    }
    for note in &admin.note {
        let Some(text) = &note.value else {
            continue;
        };
        let element = if note.kind_is(RECORD_ORIGIN) {
            XmlElement::text_element("recordOrigin", text.clone())
        } else {
            XmlElement::text_element("recordInfoNote", text.clone())
                .with_opt_attr("type", note.kind.as_deref())
        };
        record_info.push_child(element);
    }
    for language in &admin.language {
        record_info.push_child(write_language("languageOfCataloging", language));
    }
    for standard in &admin.metadata_standard {
        if let Some(code) = &standard.code {
            record_info.push_child(XmlElement::text_element("descriptionStandard", code.clone()));
        }
    }
    record_info
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cocina::{Contributor, ContributorType, DescriptiveValue, Event, Language, Source};

    #[test]
    fn test_record_info() {
        let admin = AdminMetadata {
            contributor: vec![Contributor {
                kind: Some(ContributorType::Organization),
                name: vec![DescriptiveValue {
                    value: Some("CSt".to_string()),
                    source: Some(Source::code("marcorg")),
                    ..Default::default()
                }],
                role: vec![DescriptiveValue::of(CATALOGING_AGENCY)],
                ..Default::default()
            }],
            event: vec![Event {
                kind: Some("creation".to_string()),
                date: vec![DescriptiveValue {
                    value: Some("180123".to_string()),
                    encoding: Some(Source::code("marc")),
                    ..Default::default()
                }],
                ..Default::default()
            }],
            identifier: vec![DescriptiveValue {
                value: Some("a123".to_string()),
                source: Some(Source::value("SIRSI")),
                ..Default::default()
            }],
            note: vec![DescriptiveValue::typed("Converted from MARCXML to MODS", RECORD_ORIGIN)],
            language: vec![Language {
                code: Some("eng".to_string()),
                source: Some(Source::code("iso639-2b")),
                ..Default::default()
            }],
            metadata_standard: vec![Source::code("rda")],
        };
        let record_info = write(Vocabulary::standard(), &admin);
        let source = record_info.child("recordContentSource").unwrap();
        assert_eq!(source.attr("authority"), Some("marcorg"));
        assert_eq!(record_info.child("recordCreationDate").unwrap().attr("encoding"), Some("marc"));
        assert_eq!(record_info.child("recordIdentifier").unwrap().attr("source"), Some("SIRSI"));
        assert!(record_info.child("recordOrigin").is_some());
        let language = record_info.child("languageOfCataloging").unwrap();
        assert_eq!(language.child("languageTerm").unwrap().attr("type"), Some("code"));
        assert_eq!(record_info.child_text("descriptionStandard").as_deref(), Some("rda"));
    }
}
