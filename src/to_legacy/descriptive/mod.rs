//! MODS writer.
//!
//! The inverse of the MODS reader, one submodule per element family. A
//! description and a related resource share one grammar, so both are written
//! through [`Body`].
//!
//! ```text
//! title           → titleInfo          (titles)
//! contributor     → name               (names)
//! form            → typeOfResource, genre, physicalDescription (forms)
//! note            → abstract, tableOfContents, targetAudience, note (forms)
//! event           → originInfo         (events)
//! language        → language
//! subject         → subject, classification (subjects)
//! identifier      → identifier
//! purl, access    → location, accessCondition (location)
//! note "part"     → part               (parts)
//! relatedResource → relatedItem        (related)
//! adminMetadata   → recordInfo         (admin)
//! ```
//!
//! A `parallelValue` becomes one element per member sharing a fresh
//! `altRepGroup` number. Numbers only need to be unique within a parent;
//! normalization renumbers them by content.

mod admin;
mod events;
mod forms;
mod location;
mod names;
mod parts;
mod related;
mod subjects;
mod titles;

use crate::base::XmlElement;
use crate::cocina::{
    AdminMetadata, Contributor, Description, DescriptiveAccessMetadata, DescriptiveValue, Event,
    Language, RelatedResource,
};
use crate::legacy::mods::{MODS_NS, MODS_SCHEMA_LOCATION, MODS_VERSION, XLINK_NS, XSI_NS};
use crate::vocab::Vocabulary;

/// The fields a MODS document and a `relatedItem` have in common.
#[derive(Debug, Clone, Copy)]
pub(super) struct Body<'a> {
    title: &'a [DescriptiveValue],
    contributor: &'a [Contributor],
    event: &'a [Event],
    form: &'a [DescriptiveValue],
    language: &'a [Language],
    note: &'a [DescriptiveValue],
    identifier: &'a [DescriptiveValue],
    subject: &'a [DescriptiveValue],
    purl: Option<&'a str>,
    access: Option<&'a DescriptiveAccessMetadata>,
    related_resource: &'a [RelatedResource],
    admin_metadata: Option<&'a AdminMetadata>,
}

impl<'a> From<&'a Description> for Body<'a> {
    fn from(description: &'a Description) -> Self {
        Self {
            title: &description.title,
            contributor: &description.contributor,
            event: &description.event,
            form: &description.form,
            language: &description.language,
            note: &description.note,
            identifier: &description.identifier,
            subject: &description.subject,
            purl: description.purl.as_deref(),
            access: description.access.as_ref(),
            related_resource: &description.related_resource,
            admin_metadata: description.admin_metadata.as_ref(),
        }
    }
}

impl<'a> From<&'a RelatedResource> for Body<'a> {
    fn from(related: &'a RelatedResource) -> Self {
        Self {
            title: &related.title,
            contributor: &related.contributor,
            event: &related.event,
            form: &related.form,
            language: &related.language,
            note: &related.note,
            identifier: &related.identifier,
            subject: &related.subject,
            purl: related.purl.as_deref(),
            access: related.access.as_ref(),
            related_resource: &related.related_resource,
            admin_metadata: related.admin_metadata.as_ref(),
        }
    }
}

pub(super) fn write(vocab: &Vocabulary, description: &Description) -> XmlElement {
    let mut mods = XmlElement::new("mods")
        .with_attr("xmlns", MODS_NS)
        .with_attr("xmlns:xlink", XLINK_NS)
        .with_attr("xmlns:xsi", XSI_NS)
        .with_attr("version", MODS_VERSION)
        .with_attr("xsi:schemaLocation", MODS_SCHEMA_LOCATION);
    write_body(vocab, description.into(), &mut mods, 0);
    mods
}

fn write_body(vocab: &Vocabulary, body: Body<'_>, parent: &mut XmlElement, depth: usize) {
    let mut groups = Groups::default();

    let mut names = names::write(vocab, body.contributor, &mut groups);
    for title_info in titles::write(body.title, &mut names, &mut groups) {
        parent.push_child(title_info);
    }
    let children = names
        .into_iter()
        .map(|name| name.element)
        .chain(forms::write_forms(body.form, &mut groups))
        .chain(events::write(body.event, &mut groups))
        .chain(body.language.iter().map(|language| write_language("language", language)))
        .chain(forms::write_notes(body.note, &mut groups))
        .chain(parts::write(body.note))
        .chain(subjects::write(body.subject, &mut groups))
        .chain(
            body.identifier
                .iter()
                .map(|identifier| write_identifier(vocab, "identifier", identifier)),
        )
        .chain(location::write(body.purl, body.access))
        .chain(related::write(vocab, body.related_resource, depth))
        .chain(body.admin_metadata.map(|admin| admin::write(vocab, admin)))
        .collect::<Vec<_>>();
    for child in children {
        parent.push_child(child);
    }
}

// ============================================================================
// SHARED WRITERS
// ============================================================================

/// Hands out group numbers unique within one parent element.
#[derive(Debug, Default)]
pub(super) struct Groups {
    last: usize,
}

impl Groups {
    pub(super) fn next(&mut self) -> String {
        self.last += 1;
        self.last.to_string()
    }
}

/// Write a value and its parallel members. Members share an `altRepGroup`.
pub(super) fn write_parallel(
    value: &DescriptiveValue,
    groups: &mut Groups,
    mut write_one: impl FnMut(&DescriptiveValue) -> Option<XmlElement>,
) -> Vec<XmlElement> {
    if value.parallel_value.is_empty() {
        return write_one(value).into_iter().collect();
    }
    let group = groups.next();
    value
        .parallel_value
        .iter()
        .filter_map(|member| write_one(member))
        .map(|element| element.with_attr("altRepGroup", group.clone()))
        .collect()
}

/// `authority`, `authorityURI` and `valueURI`.
pub(super) fn set_authority(element: &mut XmlElement, value: &DescriptiveValue) {
    if let Some(source) = &value.source {
        if let Some(code) = &source.code {
            element.set_attr("authority", code.clone());
        }
        if let Some(uri) = &source.uri {
            element.set_attr("authorityURI", uri.clone());
        }
    }
    if let Some(uri) = &value.uri {
        element.set_attr("valueURI", uri.clone());
    }
}

/// `displayLabel`, `lang` and `script`.
pub(super) fn set_labels(element: &mut XmlElement, value: &DescriptiveValue) {
    if let Some(label) = &value.display_label {
        element.set_attr("displayLabel", label.clone());
    }
    if let Some(language) = &value.value_language {
        set_value_language(element, language);
    }
}

/// `lang` and `script`.
pub(super) fn set_value_language(element: &mut XmlElement, language: &Language) {
    if let Some(code) = &language.code {
        element.set_attr("lang", code.clone());
    }
    if let Some(script) = language.script.as_ref().and_then(|s| s.code.as_ref()) {
        element.set_attr("script", script.clone());
    }
}

pub(super) fn set_usage(element: &mut XmlElement, status: Option<&str>) {
    if status == Some("primary") {
        element.set_attr("usage", "primary");
    }
}

/// A text/code term pair such as `roleTerm` or `placeTerm`; both terms carry
/// the authority.
pub(super) fn write_terms(name: &str, term_name: &str, value: &DescriptiveValue) -> XmlElement {
    let mut element = XmlElement::new(name);
    for (kind, text) in [("text", &value.value), ("code", &value.code)] {
        if let Some(text) = text {
            let mut term = XmlElement::text_element(term_name, text.clone()).with_attr("type", kind);
            set_authority(&mut term, value);
            element.push_child(term);
        }
    }
    element
}

/// `language` and `languageOfCataloging`.
pub(super) fn write_language(name: &str, language: &Language) -> XmlElement {
    let term = DescriptiveValue {
        value: language.value.clone(),
        code: language.code.clone(),
        uri: language.uri.clone(),
        source: language.source.clone(),
        ..Default::default()
    };
    let mut element = write_terms(name, "languageTerm", &term);
    if let Some(script) = &language.script {
        let script_terms = write_terms(name, "scriptTerm", script);
        element.children.extend(script_terms.children);
    }
    set_usage(&mut element, language.status.as_deref());
    if let Some(label) = &language.display_label {
        element.set_attr("displayLabel", label.clone());
    }
    element
}

/// `identifier` and `nameIdentifier`.
pub(super) fn write_identifier(
    vocab: &Vocabulary,
    name: &str,
    identifier: &DescriptiveValue,
) -> XmlElement {
    let text = identifier
        .value
        .as_deref()
        .or(identifier.uri.as_deref())
        .unwrap_or_default();
    let mut element = XmlElement::text_element(name, text);
    if let Some(kind) = &identifier.kind {
        element.set_attr("type", vocab.mods_identifier_type(kind).unwrap_or(kind));
    }
    if identifier.status.as_deref() == Some("invalid") {
        element.set_attr("invalid", "yes");
    }
    if let Some(uri) = identifier.source.as_ref().and_then(|s| s.uri.as_ref()) {
        element.set_attr("typeURI", uri.clone());
    }
    set_labels(&mut element, identifier);
    element
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cocina::Source;

    #[test]
    fn test_root_declares_schema() {
        let mods = write(Vocabulary::standard(), &Description::default());
        assert_eq!(mods.attr("version"), Some(MODS_VERSION));
        assert_eq!(mods.attr("xmlns"), Some(MODS_NS));
        assert!(!mods.has_element_children());
    }

    #[test]
    fn test_terms_share_authority() {
        let role = DescriptiveValue {
            value: Some("author".to_string()),
            code: Some("aut".to_string()),
            source: Some(Source::code("marcrelator")),
            ..Default::default()
        };
        let element = write_terms("role", "roleTerm", &role);
        let terms: Vec<_> = element.children_named("roleTerm").collect();
        assert_eq!(terms.len(), 2);
        assert!(terms.iter().all(|t| t.attr("authority") == Some("marcrelator")));
        assert_eq!(terms[0].attr("type"), Some("text"));
        assert_eq!(terms[1].text(), "aut");
    }

    #[test]
    fn test_identifier_uses_mods_spelling() {
        let vocab = Vocabulary::standard();
        let isbn = DescriptiveValue::typed("1234", "ISBN");
        assert_eq!(write_identifier(vocab, "identifier", &isbn).attr("type"), Some("isbn"));
        let custom = DescriptiveValue::typed("x", "special");
        assert_eq!(write_identifier(vocab, "identifier", &custom).attr("type"), Some("special"));
    }

    #[test]
    fn test_parallel_members_share_group() {
        let mut groups = Groups::default();
        let value = DescriptiveValue {
            parallel_value: vec![DescriptiveValue::of("a"), DescriptiveValue::of("b")],
            ..Default::default()
        };
        let elements = write_parallel(&value, &mut groups, |v| {
            v.value.as_ref().map(|t| XmlElement::text_element("note", t.clone()))
        });
        assert_eq!(elements.len(), 2);
        assert!(elements.iter().all(|e| e.attr("altRepGroup") == Some("1")));
        assert_eq!(groups.next(), "2");
    }
}
