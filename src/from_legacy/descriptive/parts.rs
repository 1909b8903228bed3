//! `part` → note of type "part".
//!
//! ```text
//! <part type="issue" order="2">          structuredValue:
//!   <detail type="volume">                 {type: "type",   value: "issue"}
//!     <number>3</number>                   {type: "order",  value: "2"}
//!   </detail>                              {type: "detail", structuredValue: [type, number]}
//!   <extent unit="pages">                  {type: "extent", structuredValue: [unit, start, end]}
//!     <start>7</start><end>9</end>
//!   </extent>
//! </part>
//! ```

use tracing::warn;

use super::warn_unmapped_attributes;
use crate::base::XmlElement;
use crate::cocina::DescriptiveValue;
use crate::legacy::mods::{PART_ATTRIBUTES, PART_NOTE, PART_TEXT, PartElement, part_element};

pub(super) fn read(element: &XmlElement) -> Vec<DescriptiveValue> {
    element
        .children_named("part")
        .map(read_part)
        .filter(|note| !note.structured_value.is_empty())
        .collect()
}

fn read_part(part: &XmlElement) -> DescriptiveValue {
    warn_unmapped_attributes(part, PART_ATTRIBUTES);
    let mut components = attributes(part, PART_ATTRIBUTES);
    for child in part.elements() {
        match part_element(child.local_name()) {
            Some(shape) => components.push(read_component(child, shape)),
            None => warn!(element = %child.name, "unmapped part child dropped"),
        }
    }
    DescriptiveValue {
        kind: Some(PART_NOTE.to_string()),
        structured_value: components,
        ..Default::default()
    }
}

fn read_component(element: &XmlElement, (name, handled, leaves): &PartElement) -> DescriptiveValue {
    warn_unmapped_attributes(element, handled);
    let mut parts = attributes(element, handled);
    if leaves.is_empty() {
        if let Some(text) = element.text_opt() {
            parts.push(DescriptiveValue::typed(text, PART_TEXT));
        }
    }
    for leaf in element.elements() {
        let leaf_name = leaf.local_name();
        if !leaves.contains(&leaf_name) {
            warn!(element = %leaf.name, parent = *name, "unmapped part child dropped");
            continue;
        }
        if let Some(text) = leaf.text_opt() {
            parts.push(DescriptiveValue::typed(text, leaf_name));
        }
    }
    DescriptiveValue {
        kind: Some(name.to_string()),
        structured_value: parts,
        ..Default::default()
    }
}

fn attributes(element: &XmlElement, names: &[&str]) -> Vec<DescriptiveValue> {
    names
        .iter()
        .filter_map(|name| element.attr(name).map(|value| DescriptiveValue::typed(value, *name)))
        .collect()
}
