//! `titleInfo` → title.
//!
//! A title linked to a name through `nameTitleGroup` becomes a structured
//! value of a `name` part (a copy of the contributor's name) and a `title`
//! part; the writer finds the contributor again by that name.

use tracing::warn;

use super::{
    alt_rep_groups, names, parallel, primary_status, read_authority, read_labels,
    warn_unmapped_attributes,
};
use crate::base::XmlElement;
use crate::cocina::DescriptiveValue;
use crate::legacy::mods::{TITLE_PARTS, to_canonical};

const TITLE_ATTRIBUTES: &[&str] = &[
    "type",
    "usage",
    "supplied",
    "altRepGroup",
    "nameTitleGroup",
    "authority",
    "authorityURI",
    "valueURI",
    "displayLabel",
    "lang",
    "script",
];

pub(super) fn read(element: &XmlElement) -> Vec<DescriptiveValue> {
    alt_rep_groups(element.children_named("titleInfo"))
        .into_iter()
        .map(|group| {
            parallel(
                group
                    .into_iter()
                    .map(|title_info| read_title(element, title_info))
                    .collect(),
            )
        })
        .collect()
}

fn read_title(parent: &XmlElement, title_info: &XmlElement) -> DescriptiveValue {
    warn_unmapped_attributes(title_info, TITLE_ATTRIBUTES);
    let mut title = title_value(title_info);

    let linked_name = title_info.attr("nameTitleGroup").and_then(|group| {
        parent
            .children_named("name")
            .find(|name| name.attr("nameTitleGroup") == Some(group))
    });
    if let Some(name) = linked_name {
        title = DescriptiveValue {
            structured_value: vec![
                names::name_value(name).with_kind("name"),
                title.with_kind("title"),
            ],
            ..Default::default()
        };
    }

    title.kind = title_info.attr("type").map(str::to_string);
    title.status = primary_status(title_info);
    if title_info.attr("supplied") == Some("yes") {
        title.qualifier = Some("supplied".to_string());
    }
    read_authority(title_info, &mut title);
    read_labels(title_info, &mut title);
    title
}

/// The title text: a plain value for a lone `title`, otherwise typed parts.
pub(super) fn title_value(title_info: &XmlElement) -> DescriptiveValue {
    let parts: Vec<DescriptiveValue> = title_info
        .elements()
        .filter_map(|part| match to_canonical(TITLE_PARTS, part.local_name()) {
            Some(kind) => Some(DescriptiveValue::typed(part.text(), kind)),
            None => {
                warn!(element = %part.name, "unmapped titleInfo part dropped");
                None
            }
        })
        .collect();
    match parts.as_slice() {
        [only] if only.kind_is("main title") => DescriptiveValue {
            value: only.value.clone(),
            ..Default::default()
        },
        _ => DescriptiveValue {
            structured_value: parts,
            ..Default::default()
        },
    }
}
