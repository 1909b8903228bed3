//! `name` → contributor.

use tracing::warn;

use super::{
    alt_rep_groups, parallel, primary_status, read_authority, read_identifier, read_labels,
    read_terms, warn_unmapped_attributes,
};
use crate::base::XmlElement;
use crate::cocina::{Contributor, ContributorType, DescriptiveValue};
use crate::legacy::mods::{NAME_PARTS, to_canonical};
use crate::vocab::Vocabulary;

const NAME_ATTRIBUTES: &[&str] = &[
    "type",
    "usage",
    "altRepGroup",
    "nameTitleGroup",
    "authority",
    "authorityURI",
    "valueURI",
    "displayLabel",
    "lang",
    "script",
];

const NAME_CHILDREN: &[&str] = &[
    "namePart",
    "displayForm",
    "role",
    "nameIdentifier",
    "description",
    "affiliation",
];

pub(super) fn read(vocab: &Vocabulary, element: &XmlElement) -> Vec<Contributor> {
    alt_rep_groups(element.children_named("name"))
        .into_iter()
        .map(|group| read_contributor(vocab, &group))
        .collect()
}

/// Roles and details come from the first member of a parallel group.
fn read_contributor(vocab: &Vocabulary, group: &[&XmlElement]) -> Contributor {
    let first = group[0];
    warn_unmapped_attributes(first, NAME_ATTRIBUTES);
    for child in first.elements() {
        if !NAME_CHILDREN.contains(&child.local_name()) {
            warn!(element = %child.name, "unmapped name child dropped");
        }
    }

    let mut contributor = Contributor {
        kind: first.attr("type").and_then(ContributorType::from_mods),
        status: primary_status(first),
        ..Default::default()
    };

    let name = parallel(group.iter().map(|name| name_value(name)).collect());
    if name != DescriptiveValue::default() {
        contributor.name.push(name);
    }
    contributor.name.extend(
        first
            .children_named("displayForm")
            .map(|form| DescriptiveValue::typed(form.text(), "display")),
    );
    contributor.role = first
        .children_named("role")
        .map(|role| read_terms(role, "roleTerm"))
        .collect();
    contributor.identifier = first
        .children_named("nameIdentifier")
        .map(|identifier| read_identifier(vocab, identifier))
        .collect();
    contributor.note = first
        .children_named("description")
        .map(|description| DescriptiveValue::typed(description.text(), "description"))
        .collect();
    contributor.affiliation = first
        .children_named("affiliation")
        .map(|affiliation| DescriptiveValue::of(affiliation.text()))
        .collect();
    contributor
}

/// The name itself: a plain value for one untyped part, otherwise typed parts.
pub(super) fn name_value(name: &XmlElement) -> DescriptiveValue {
    let parts: Vec<&XmlElement> = name.children_named("namePart").collect();
    let mut value = match parts.as_slice() {
        [] => DescriptiveValue::default(),
        [part] if !part.has_attr("type") => DescriptiveValue::of(part.text()),
        _ => DescriptiveValue {
            structured_value: parts
                .iter()
                .map(|part| {
                    let kind = match part.attr("type") {
                        Some(kind) => to_canonical(NAME_PARTS, kind).unwrap_or(kind),
                        None => "name",
                    };
                    DescriptiveValue::typed(part.text(), kind)
                })
                .collect(),
            ..Default::default()
        },
    };
    read_authority(name, &mut value);
    read_labels(name, &mut value);
    value
}
