//! contributor → `name`.

use tracing::warn;

use super::{Groups, set_authority, set_labels, set_usage, write_identifier, write_terms};
use crate::base::XmlElement;
use crate::cocina::{Contributor, DescriptiveValue};
use crate::legacy::mods::{NAME_PARTS, to_mods};
use crate::vocab::Vocabulary;

/// A written `name` and the name value it came from, kept so titles can link
/// to it through `nameTitleGroup`.
#[derive(Debug)]
pub(super) struct WrittenName<'a> {
    pub(super) value: Option<&'a DescriptiveValue>,
    pub(super) element: XmlElement,
}

pub(super) fn write<'a>(
    vocab: &Vocabulary,
    contributors: &'a [Contributor],
    groups: &mut Groups,
) -> Vec<WrittenName<'a>> {
    contributors
        .iter()
        .flat_map(|contributor| write_contributor(vocab, contributor, groups))
        .collect()
}

/// One `name` per parallel member; roles and details go on the first.
fn write_contributor<'a>(
    vocab: &Vocabulary,
    contributor: &'a Contributor,
    groups: &mut Groups,
) -> Vec<WrittenName<'a>> {
    let (display_forms, names): (Vec<&DescriptiveValue>, Vec<&DescriptiveValue>) =
        contributor.name.iter().partition(|name| name.kind_is("display"));
    if names.len() > 1 {
        warn!(count = names.len(), "contributor has several names; only the first is written");
    }
    let members: Vec<Option<&'a DescriptiveValue>> = match names.first() {
        Some(name) if !name.parallel_value.is_empty() => name.parallel_value.iter().map(Some).collect(),
        first => vec![first.copied()],
    };
    let group = (members.len() > 1).then(|| groups.next());

    members
        .into_iter()
        .enumerate()
        .map(|(index, member)| {
            let mut element = XmlElement::new("name")
                .with_opt_attr("type", contributor.kind.and_then(|kind| kind.mods()));
            if let Some(group) = &group {
                element.set_attr("altRepGroup", group.clone());
            }
            if let Some(value) = member {
                write_name_parts(&mut element, value);
            }
            if index == 0 {
                set_usage(&mut element, contributor.status.as_deref());
                write_details(vocab, contributor, &display_forms, &mut element);
            }
            WrittenName {
                value: member,
                element,
            }
        })
        .collect()
}

fn write_details(
    vocab: &Vocabulary,
    contributor: &Contributor,
    display_forms: &[&DescriptiveValue],
    element: &mut XmlElement,
) {
    for form in display_forms {
        if let Some(text) = &form.value {
            element.push_child(XmlElement::text_element("displayForm", text.clone()));
        }
    }
    for role in &contributor.role {
        element.push_child(write_terms("role", "roleTerm", role));
    }
    for identifier in &contributor.identifier {
        element.push_child(write_identifier(vocab, "nameIdentifier", identifier));
    }
    for note in &contributor.note {
        match (&note.value, note.kind.as_deref()) {
            (Some(text), Some("description")) => {
                element.push_child(XmlElement::text_element("description", text.clone()))
            }
            (_, kind) => warn!(kind, "contributor note without a MODS element dropped"),
        }
    }
    for affiliation in &contributor.affiliation {
        if let Some(text) = affiliation.display_text() {
            element.push_child(XmlElement::text_element("affiliation", text));
        }
    }
}

/// `namePart`s for a name value: a plain value is one untyped part.
pub(super) fn write_name_parts(element: &mut XmlElement, value: &DescriptiveValue) {
    if let Some(text) = &value.value {
        element.push_child(XmlElement::text_element("namePart", text.clone()));
    }
    for part in &value.structured_value {
        let Some(text) = &part.value else {
            continue;
        };
        let name_part = XmlElement::text_element("namePart", text.clone()).with_opt_attr(
            "type",
            part.kind
                .as_deref()
                .filter(|kind| *kind != "name")
                .map(|kind| to_mods(NAME_PARTS, kind).unwrap_or(kind)),
        );
        element.push_child(name_part);
    }
    set_authority(element, value);
    set_labels(element, value);
}
