//! MODS reader.
//!
//! A MODS document and a `relatedItem` share one grammar, so both are read by
//! [`read_body`] into a [`RelatedResource`]; the document root is then
//! repackaged as a [`Description`].
//!
//! ```text
//! titleInfo                  → title          (titles)
//! name                       → contributor    (names)
//! typeOfResource, genre,
//! physicalDescription        → form           (forms)
//! abstract, tableOfContents,
//! targetAudience, note       → note           (forms)
//! originInfo                 → event          (events)
//! language                   → language       (language)
//! subject, classification    → subject        (subjects)
//! identifier                 → identifier
//! location, accessCondition  → purl, access   (location)
//! part                       → note "part"    (parts)
//! relatedItem                → relatedResource (related)
//! recordInfo                 → adminMetadata  (admin)
//! ```
//!
//! `altRepGroup` siblings fold into one node whose `parallelValue` holds a
//! value per member; the attribute itself is not kept.

mod admin;
mod events;
mod forms;
mod language;
mod location;
mod names;
mod parts;
mod related;
mod subjects;
mod titles;

use rustc_hash::FxHashMap;
use tracing::warn;

use crate::base::XmlElement;
use crate::cocina::{Description, DescriptiveValue, Language, RelatedResource, Source};
use crate::legacy::mods::MAPPED_ELEMENTS;
use crate::vocab::Vocabulary;

pub(super) fn read(vocab: &Vocabulary, mods: &XmlElement) -> Description {
    let body = read_body(vocab, mods, 0);
    Description {
        title: body.title,
        contributor: body.contributor,
        event: body.event,
        form: body.form,
        language: body.language,
        note: body.note,
        identifier: body.identifier,
        subject: body.subject,
        access: body.access,
        related_resource: body.related_resource,
        admin_metadata: body.admin_metadata,
        purl: body.purl,
    }
}

fn read_body(vocab: &Vocabulary, element: &XmlElement, depth: usize) -> RelatedResource {
    for child in element.elements() {
        if !MAPPED_ELEMENTS.contains(&child.local_name()) {
            warn!(element = %child.name, "unmapped MODS element dropped");
        }
    }

    let mut body = RelatedResource {
        title: titles::read(element),
        contributor: names::read(vocab, element),
        event: events::read(element),
        form: forms::read_forms(element),
        language: language::read(element),
        note: forms::read_notes(element)
            .into_iter()
            .chain(parts::read(element))
            .collect(),
        identifier: element
            .children_named("identifier")
            .map(|identifier| read_identifier(vocab, identifier))
            .collect(),
        subject: subjects::read(element),
        related_resource: related::read(vocab, element, depth),
        admin_metadata: admin::read(vocab, element),
        ..Default::default()
    };
    location::read(element, &mut body);
    body
}

// ============================================================================
// SHARED READERS
// ============================================================================

/// `altRepGroup` members gathered at the position of the first member;
/// ungrouped elements stand alone.
pub(super) fn alt_rep_groups<'a>(
    elements: impl Iterator<Item = &'a XmlElement>,
) -> Vec<Vec<&'a XmlElement>> {
    let mut groups: Vec<Vec<&XmlElement>> = Vec::new();
    let mut positions: FxHashMap<&str, usize> = FxHashMap::default();
    for element in elements {
        match element.attr("altRepGroup") {
            Some(group) => match positions.get(group) {
                Some(&index) => groups[index].push(element),
                None => {
                    positions.insert(group, groups.len());
                    groups.push(vec![element]);
                }
            },
            None => groups.push(vec![element]),
        }
    }
    groups
}

/// One value stays as it is; several become a parallel value.
pub(super) fn parallel(mut values: Vec<DescriptiveValue>) -> DescriptiveValue {
    if values.len() == 1 {
        values.remove(0)
    } else {
        DescriptiveValue {
            parallel_value: values,
            ..Default::default()
        }
    }
}

/// `authority`, `authorityURI` and `valueURI`.
pub(super) fn read_authority(element: &XmlElement, value: &mut DescriptiveValue) {
    let source = read_source(element);
    if !source.is_empty() {
        value.source = Some(source);
    }
    if let Some(uri) = element.attr("valueURI") {
        value.uri = Some(uri.to_string());
    }
}

pub(super) fn read_source(element: &XmlElement) -> Source {
    Source {
        code: element.attr("authority").map(str::to_string),
        uri: element.attr("authorityURI").map(str::to_string),
        ..Default::default()
    }
}

/// `displayLabel`, `lang` and `script`.
pub(super) fn read_labels(element: &XmlElement, value: &mut DescriptiveValue) {
    if let Some(label) = element.attr("displayLabel") {
        value.display_label = Some(label.to_string());
    }
    if let Some(language) = value_language(element) {
        value.value_language = Some(Box::new(language));
    }
}

pub(super) fn value_language(element: &XmlElement) -> Option<Language> {
    let lang = element.attr("lang");
    let script = element.attr("script");
    if lang.is_none() && script.is_none() {
        return None;
    }
    Some(Language {
        code: lang.map(str::to_string),
        script: script.map(|code| DescriptiveValue {
            code: Some(code.to_string()),
            ..Default::default()
        }),
        ..Default::default()
    })
}

pub(super) fn primary_status(element: &XmlElement) -> Option<String> {
    (element.attr("usage") == Some("primary")).then(|| "primary".to_string())
}

/// A text/code term pair such as `roleTerm` or `placeTerm`.
pub(super) fn read_terms(element: &XmlElement, term_name: &str) -> DescriptiveValue {
    let mut value = DescriptiveValue::default();
    for term in element.children_named(term_name) {
        match term.attr("type") {
            Some("code") => value.code = term.text_opt(),
            _ => value.value = term.text_opt(),
        }
        read_authority(term, &mut value);
    }
    value
}

/// `identifier` and `nameIdentifier`.
pub(super) fn read_identifier(vocab: &Vocabulary, identifier: &XmlElement) -> DescriptiveValue {
    let mut value = DescriptiveValue {
        value: identifier.text_opt(),
        kind: identifier.attr("type").map(|kind| {
            vocab
                .cocina_identifier_type(kind)
                .unwrap_or(kind)
                .to_string()
        }),
        status: (identifier.attr("invalid") == Some("yes")).then(|| "invalid".to_string()),
        ..Default::default()
    };
    if let Some(uri) = identifier.attr("typeURI") {
        value.source = Some(Source {
            uri: Some(uri.to_string()),
            ..Default::default()
        });
    }
    read_labels(identifier, &mut value);
    value
}

/// Log attributes the reader does not carry.
pub(super) fn warn_unmapped_attributes(element: &XmlElement, handled: &[&str]) {
    for key in element.attributes.keys() {
        if !handled.contains(&key.as_str()) && !key.starts_with("xmlns") {
            warn!(element = %element.name, attribute = %key, "unmapped MODS attribute dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn description(body: &str) -> Description {
        let xml = format!(r#"<mods xmlns="http://www.loc.gov/mods/v3" version="3.7">{body}</mods>"#);
        read(Vocabulary::standard(), &XmlElement::parse(&xml).unwrap())
    }

    #[test]
    fn test_alt_rep_groups_keep_first_position() {
        let mods = XmlElement::parse(
            r#"<mods><note altRepGroup="1">a</note><note>b</note><note altRepGroup="1">c</note></mods>"#,
        )
        .unwrap();
        let groups = alt_rep_groups(mods.children_named("note"));
        let texts: Vec<Vec<String>> = groups
            .iter()
            .map(|g| g.iter().map(|e| e.text()).collect())
            .collect();
        assert_eq!(texts, vec![vec!["a", "c"], vec!["b"]]);
    }

    #[test]
    fn test_identifiers() {
        let description = description(
            r#"<identifier type="isbn">1234</identifier>
               <identifier type="local" invalid="yes" displayLabel="Old">x-1</identifier>
               <identifier type="special">s</identifier>"#,
        );
        let kinds: Vec<_> = description.identifier.iter().map(|i| i.kind.as_deref()).collect();
        assert_eq!(kinds, vec![Some("ISBN"), Some("local"), Some("special")]);
        assert_eq!(description.identifier[1].status.as_deref(), Some("invalid"));
        assert_eq!(description.identifier[1].display_label.as_deref(), Some("Old"));
    }

    #[test]
    fn test_unmapped_elements_dropped() {
        let description = description("<extension><x/></extension><part>1</part><foo>bar</foo>");
        assert_eq!(description, Description::default());
    }
}
