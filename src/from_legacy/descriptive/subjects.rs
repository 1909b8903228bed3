//! `subject` and `classification` → subject.
//!
//! A subject with one term becomes that term's value; with several terms it
//! becomes a structured value of typed parts. The term shape decides how the
//! writer spells it again: a `place` value is `geographic`, a `place` code is
//! `geographicCode`, structured `place` is `hierarchicalGeographic`.

use tracing::warn;

use super::{
    alt_rep_groups, names, parallel, primary_status, read_authority, read_labels, titles,
};
use crate::base::XmlElement;
use crate::cocina::{DescriptiveValue, Source};
use crate::legacy::mods::{
    CARTOGRAPHIC_PARTS, CARTOGRAPHICS, CLASSIFICATION, HIERARCHICAL_PARTS, NAME_TYPES,
    SUBJECT_TERMS, Table, to_canonical,
};

pub(super) fn read(element: &XmlElement) -> Vec<DescriptiveValue> {
    let mut subjects: Vec<DescriptiveValue> = alt_rep_groups(element.children_named("subject"))
        .into_iter()
        .filter_map(|group| {
            let members: Vec<DescriptiveValue> =
                group.into_iter().filter_map(read_subject).collect();
            (!members.is_empty()).then(|| parallel(members))
        })
        .collect();
    subjects.extend(element.children_named("classification").map(read_classification));
    subjects
}

fn read_subject(subject: &XmlElement) -> Option<DescriptiveValue> {
    let mut terms: Vec<DescriptiveValue> = subject.elements().filter_map(read_term).collect();
    let mut value = match terms.len() {
        0 => return None,
        1 => {
            let mut term = terms.remove(0);
            let mut subject_level = DescriptiveValue::default();
            read_authority(subject, &mut subject_level);
            if term.source.is_none() {
                term.source = subject_level.source;
            }
            if term.uri.is_none() {
                term.uri = subject_level.uri;
            }
            term
        }
        _ => {
            let mut value = DescriptiveValue {
                structured_value: terms,
                ..Default::default()
            };
            read_authority(subject, &mut value);
            value
        }
    };
    if let Some(label) = subject.attr("displayLabel") {
        value.display_label = Some(label.to_string());
    }
    value.status = primary_status(subject);
    Some(value)
}

fn read_term(term: &XmlElement) -> Option<DescriptiveValue> {
    let name = term.local_name();
    let mut value = if let Some(kind) = to_canonical(SUBJECT_TERMS, name) {
        let mut value = DescriptiveValue::typed(term.text(), kind);
        value.encoding = term.attr("encoding").map(Source::code);
        value
    } else {
        match name {
            "name" => {
                let kind = term
                    .attr("type")
                    .and_then(|kind| to_canonical(NAME_TYPES, kind))
                    .unwrap_or("name");
                return Some(names::name_value(term).with_kind(kind));
            }
            "titleInfo" => titles::title_value(term).with_kind("title"),
            "geographicCode" => DescriptiveValue {
                code: term.text_opt(),
                kind: Some("place".to_string()),
                ..Default::default()
            },
            "hierarchicalGeographic" => structured(term, HIERARCHICAL_PARTS, "place"),
            "cartographics" => structured(term, CARTOGRAPHIC_PARTS, CARTOGRAPHICS),
            other => {
                warn!(element = other, "unmapped subject term dropped");
                return None;
            }
        }
    };
    read_authority(term, &mut value);
    read_labels(term, &mut value);
    Some(value)
}

fn structured(term: &XmlElement, table: Table, kind: &str) -> DescriptiveValue {
    DescriptiveValue {
        structured_value: term
            .elements()
            .filter_map(|part| {
                let part_kind = to_canonical(table, part.local_name())?;
                Some(DescriptiveValue::typed(part.text(), part_kind))
            })
            .collect(),
        kind: Some(kind.to_string()),
        ..Default::default()
    }
}

fn read_classification(classification: &XmlElement) -> DescriptiveValue {
    let source = Source {
        code: classification.attr("authority").map(str::to_string),
        uri: classification.attr("authorityURI").map(str::to_string),
        version: classification.attr("edition").map(str::to_string),
        ..Default::default()
    };
    let mut value = DescriptiveValue::typed(classification.text(), CLASSIFICATION);
    if !source.is_empty() {
        value.source = Some(source);
    }
    read_labels(classification, &mut value);
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subjects(body: &str) -> Vec<DescriptiveValue> {
        read(&XmlElement::parse(&format!("<mods>{body}</mods>")).unwrap())
    }

    #[test]
    fn test_single_term_subjects() {
        let subjects = subjects(
            r#"<subject><topic authority="lcsh" valueURI="http://id.loc.gov/authorities/subjects/sh85082139">Maps</topic></subject>
               <subject authority="lcsh"><geographic>California</geographic></subject>
               <subject><geographicCode authority="marcgac">n-us-ca</geographicCode></subject>
               <subject><name type="personal"><namePart>Stanford, Leland</namePart></name></subject>"#,
        );
        assert!(subjects[0].kind_is("topic"));
        assert_eq!(subjects[0].source_code(), Some("lcsh"));
        assert!(subjects[0].uri.is_some());
        assert!(subjects[1].kind_is("place"));
        assert_eq!(subjects[1].source_code(), Some("lcsh"));
        assert_eq!(subjects[2].code.as_deref(), Some("n-us-ca"));
        assert!(subjects[3].kind_is("person"));
        assert_eq!(subjects[3].value.as_deref(), Some("Stanford, Leland"));
    }

    #[test]
    fn test_multi_term_subject() {
        let subjects = subjects(
            r#"<subject authority="lcsh"><topic>Railroads</topic><geographic>California</geographic><temporal>19th century</temporal></subject>"#,
        );
        let subject = &subjects[0];
        assert_eq!(subject.source_code(), Some("lcsh"));
        let kinds: Vec<_> = subject.structured_value.iter().map(|p| p.kind.as_deref()).collect();
        assert_eq!(kinds, vec![Some("topic"), Some("place"), Some("time")]);
    }

    #[test]
    fn test_hierarchical_and_classification() {
        let subjects = subjects(
            r#"<subject><hierarchicalGeographic><country>United States</country><state>California</state></hierarchicalGeographic></subject>
               <subject><cartographics><scale>1:24,000</scale><coordinates>W 122 / N 37</coordinates></cartographics></subject>
               <classification authority="lcc" edition="11">G4361</classification>"#,
        );
        assert_eq!(subjects[0].part_value("state"), Some("California"));
        assert_eq!(subjects[1].part_value("map scale"), Some("1:24,000"));
        assert!(subjects[2].kind_is(CLASSIFICATION));
        assert_eq!(subjects[2].source.as_ref().unwrap().version.as_deref(), Some("11"));
    }
}
