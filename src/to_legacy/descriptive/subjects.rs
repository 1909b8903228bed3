//! subject → `subject` and `classification`.
//!
//! The term shape picks the element: a `place` value is `geographic`, a
//! `place` code is `geographicCode`, structured `place` is
//! `hierarchicalGeographic`. A subject of several terms carries its authority
//! on the `subject`; a single term carries it itself.

use tracing::warn;

use super::names::write_name_parts;
use super::titles::write_title_parts;
use super::{Groups, set_authority, set_labels, set_usage, write_parallel};
use crate::base::XmlElement;
use crate::cocina::DescriptiveValue;
use crate::legacy::mods::{
    CARTOGRAPHIC_PARTS, CARTOGRAPHICS, CLASSIFICATION, HIERARCHICAL_PARTS, NAME_TYPES,
    SUBJECT_TERMS, Table, to_mods,
};

pub(super) fn write(subjects: &[DescriptiveValue], groups: &mut Groups) -> Vec<XmlElement> {
    let mut elements = Vec::new();
    let mut classifications = Vec::new();
    for subject in subjects {
        if subject.kind_is(CLASSIFICATION) {
            classifications.extend(write_classification(subject));
        } else {
            elements.extend(write_parallel(subject, groups, write_subject));
        }
    }
    elements.extend(classifications);
    elements
}

fn write_subject(value: &DescriptiveValue) -> Option<XmlElement> {
    let mut subject = XmlElement::new("subject")
        .with_opt_attr("displayLabel", value.display_label.as_deref());
    set_usage(&mut subject, value.status.as_deref());

    if value.kind.is_none() && !value.structured_value.is_empty() {
        for part in &value.structured_value {
            if let Some(term) = write_term(part) {
                subject.push_child(term);
            }
        }
        set_authority(&mut subject, value);
    } else {
        let term = DescriptiveValue {
            display_label: None,
            ..value.clone()
        };
        subject.push_child(write_term(&term)?);
    }
    subject.has_element_children().then_some(subject)
}

fn write_term(value: &DescriptiveValue) -> Option<XmlElement> {
    let kind = value.kind.as_deref().unwrap_or("topic");
    let is_name = kind == "name" || to_mods(NAME_TYPES, kind).is_some();

    let mut term = match (kind, &value.value, &value.code) {
        ("title", _, _) => {
            let mut title_info = XmlElement::new("titleInfo");
            write_title_parts(&mut title_info, value);
            title_info
        }
        _ if is_name => {
            let mut name = XmlElement::new("name").with_opt_attr("type", to_mods(NAME_TYPES, kind));
            write_name_parts(&mut name, value);
            return Some(name);
        }
        ("place", None, Some(code)) => XmlElement::text_element("geographicCode", code.clone()),
        ("place", None, None) => structured("hierarchicalGeographic", HIERARCHICAL_PARTS, value),
        (CARTOGRAPHICS, _, _) => structured(CARTOGRAPHICS, CARTOGRAPHIC_PARTS, value),
        (kind, Some(text), _) => match to_mods(SUBJECT_TERMS, kind) {
            Some(name) => XmlElement::text_element(name, text.clone())
                .with_opt_attr("encoding", value.encoding_code()),
            None => {
                warn!(kind, "subject term without a MODS element dropped");
                return None;
            }
        },
        (kind, None, _) => {
            warn!(kind, "subject term without a value dropped");
            return None;
        }
    };
    set_authority(&mut term, value);
    set_labels(&mut term, value);
    Some(term)
}

fn structured(name: &str, table: Table, value: &DescriptiveValue) -> XmlElement {
    let mut element = XmlElement::new(name);
    for part in &value.structured_value {
        let (Some(kind), Some(text)) = (part.kind.as_deref(), &part.value) else {
            continue;
        };
        match to_mods(table, kind) {
            Some(part_name) => element.push_child(XmlElement::text_element(part_name, text.clone())),
            None => warn!(kind, element = name, "subject part without a MODS element dropped"),
        }
    }
    element
}

fn write_classification(value: &DescriptiveValue) -> Option<XmlElement> {
    let text = value.value.as_deref()?;
    let source = value.source.as_ref();
    let mut classification = XmlElement::text_element("classification", text)
        .with_opt_attr("authority", source.and_then(|s| s.code.as_deref()))
        .with_opt_attr("authorityURI", source.and_then(|s| s.uri.as_deref()))
        .with_opt_attr("edition", source.and_then(|s| s.version.as_deref()));
    set_labels(&mut classification, value);
    Some(classification)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cocina::Source;

    fn with_source(mut value: DescriptiveValue, code: &str) -> DescriptiveValue {
        value.source = Some(Source::code(code));
        value
    }

    #[test]
    fn test_single_term_authority_on_term() {
        let topic = with_source(DescriptiveValue::typed("Maps", "topic"), "lcsh");
        let subject = write_subject(&topic).unwrap();
        assert!(!subject.has_attr("authority"));
        assert_eq!(subject.child("topic").unwrap().attr("authority"), Some("lcsh"));
    }

    #[test]
    fn test_multi_term_authority_on_subject() {
        let value = with_source(
            DescriptiveValue {
                structured_value: vec![
                    DescriptiveValue::typed("Railroads", "topic"),
                    DescriptiveValue::typed("California", "place"),
                    DescriptiveValue::typed("19th century", "time"),
                ],
                ..Default::default()
            },
            "lcsh",
        );
        let subject = write_subject(&value).unwrap();
        assert_eq!(subject.attr("authority"), Some("lcsh"));
        let names: Vec<_> = subject.elements().map(|e| e.local_name()).collect();
        assert_eq!(names, vec!["topic", "geographic", "temporal"]);
    }

    #[test]
    fn test_place_shapes() {
        let code = DescriptiveValue {
            code: Some("n-us-ca".to_string()),
            kind: Some("place".to_string()),
            ..Default::default()
        };
        assert!(write_subject(&code).unwrap().child("geographicCode").is_some());

        let hierarchical = DescriptiveValue {
            structured_value: vec![
                DescriptiveValue::typed("United States", "country"),
                DescriptiveValue::typed("California", "state"),
            ],
            kind: Some("place".to_string()),
            ..Default::default()
        };
        let subject = write_subject(&hierarchical).unwrap();
        let geographic = subject.child("hierarchicalGeographic").unwrap();
        assert_eq!(geographic.child_text("state").as_deref(), Some("California"));
    }

    #[test]
    fn test_name_subject_and_classification() {
        let person = DescriptiveValue::typed("Stanford, Leland", "person");
        let subject = write_subject(&person).unwrap();
        let name = subject.child("name").unwrap();
        assert_eq!(name.attr("type"), Some("personal"));
        assert_eq!(name.child_text("namePart").as_deref(), Some("Stanford, Leland"));

        let classification = DescriptiveValue {
            value: Some("G4361".to_string()),
            kind: Some(CLASSIFICATION.to_string()),
            source: Some(Source {
                code: Some("lcc".to_string()),
                version: Some("11".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let elements = write(&[classification], &mut Groups::default());
        assert_eq!(elements[0].local_name(), "classification");
        assert_eq!(elements[0].attr("edition"), Some("11"));
    }
}
