//! title → `titleInfo`.

use tracing::warn;

use super::names::WrittenName;
use super::{Groups, set_authority, set_labels, set_usage};
use crate::base::XmlElement;
use crate::cocina::DescriptiveValue;
use crate::legacy::mods::{TITLE_PARTS, to_mods};

pub(super) fn write(
    titles: &[DescriptiveValue],
    names: &mut [WrittenName<'_>],
    groups: &mut Groups,
) -> Vec<XmlElement> {
    let mut elements = Vec::new();
    for title in titles {
        let (members, group) = if title.parallel_value.is_empty() {
            (vec![title], None)
        } else {
            (title.parallel_value.iter().collect(), Some(groups.next()))
        };
        for member in members {
            let (mut title_info, linked_name) = write_title(member);
            if let Some(group) = &group {
                title_info.set_attr("altRepGroup", group.clone());
            }
            if let Some(name) = linked_name {
                match link(name, names, groups) {
                    Some(group) => title_info.set_attr("nameTitleGroup", group),
                    None => warn!("title names a contributor that is not present; link dropped"),
                }
            }
            elements.push(title_info);
        }
    }
    elements
}

/// The `titleInfo` and, for a name-title, the name part it links to.
fn write_title(title: &DescriptiveValue) -> (XmlElement, Option<&DescriptiveValue>) {
    let mut title_info = XmlElement::new("titleInfo");
    let name = title.part("name");
    match (name, title.part("title")) {
        (Some(_), Some(text)) => write_title_parts(&mut title_info, text),
        _ => write_title_parts(&mut title_info, title),
    }
    if let Some(kind) = &title.kind {
        title_info.set_attr("type", kind.clone());
    }
    set_usage(&mut title_info, title.status.as_deref());
    if title.qualifier.as_deref() == Some("supplied") {
        title_info.set_attr("supplied", "yes");
    }
    set_authority(&mut title_info, title);
    set_labels(&mut title_info, title);
    (title_info, name.filter(|_| title.part("title").is_some()))
}

/// A plain value is a lone `title`; structured parts keep their part names.
pub(super) fn write_title_parts(title_info: &mut XmlElement, value: &DescriptiveValue) {
    if let Some(text) = &value.value {
        title_info.push_child(XmlElement::text_element("title", text.clone()));
        return;
    }
    for part in &value.structured_value {
        let (Some(kind), Some(text)) = (part.kind.as_deref(), &part.value) else {
            continue;
        };
        match to_mods(TITLE_PARTS, kind) {
            Some(element) => title_info.push_child(XmlElement::text_element(element, text.clone())),
            None => warn!(kind, "title part without a MODS element dropped"),
        }
    }
}

/// Find the name element written for this name and give both ends a
/// `nameTitleGroup`; a name already linked keeps its number.
fn link(name: &DescriptiveValue, names: &mut [WrittenName<'_>], groups: &mut Groups) -> Option<String> {
    let unlinked = DescriptiveValue {
        kind: None,
        ..name.clone()
    };
    let written = names
        .iter_mut()
        .find(|written| written.value.is_some_and(|value| *value == unlinked))?;
    if let Some(group) = written.element.attr("nameTitleGroup") {
        return Some(group.to_string());
    }
    let group = groups.next();
    written.element.set_attr("nameTitleGroup", group.clone());
    Some(group)
}
