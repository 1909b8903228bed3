//! note of type "part" → `part`.

use tracing::warn;

use crate::base::XmlElement;
use crate::cocina::DescriptiveValue;
use crate::legacy::mods::{PART_ATTRIBUTES, PART_NOTE, PART_TEXT, PartElement, part_element};

/// A part note is structured; a plain note typed "part" stays a `note`.
pub(super) fn is_part(note: &DescriptiveValue) -> bool {
    note.kind_is(PART_NOTE) && !note.structured_value.is_empty()
}

pub(super) fn write(notes: &[DescriptiveValue]) -> Vec<XmlElement> {
    notes.iter().filter(|note| is_part(note)).map(write_part).collect()
}

fn write_part(note: &DescriptiveValue) -> XmlElement {
    let mut part = XmlElement::new("part");
    for component in &note.structured_value {
        let Some(kind) = component.kind.as_deref() else {
            warn!("untyped part component dropped");
            continue;
        };
        if PART_ATTRIBUTES.contains(&kind) {
            if let Some(value) = &component.value {
                part.set_attr(kind, value.clone());
            }
            continue;
        }
        match part_element(kind) {
            Some(shape) => part.push_child(write_component(component, shape)),
            None => warn!(kind, "part component without a MODS element dropped"),
        }
    }
    part
}

fn write_component(component: &DescriptiveValue, (name, attributes, leaves): &PartElement) -> XmlElement {
    let mut element = XmlElement::new(*name);
    for part in &component.structured_value {
        let (Some(kind), Some(value)) = (part.kind.as_deref(), &part.value) else {
            continue;
        };
        if attributes.contains(&kind) {
            element.set_attr(kind, value.clone());
        } else if leaves.contains(&kind) {
            element.push_child(XmlElement::text_element(kind, value.clone()));
        } else if kind == PART_TEXT && leaves.is_empty() {
            element = element.with_text(value.clone());
        } else {
            warn!(element = *name, kind, "part value without a MODS counterpart dropped");
        }
    }
    element
}

#[cfg(test)]
mod tests {
    use super::*;

    fn structured(kind: &str, parts: Vec<DescriptiveValue>) -> DescriptiveValue {
        DescriptiveValue {
            kind: Some(kind.to_string()),
            structured_value: parts,
            ..Default::default()
        }
    }

    #[test]
    fn test_part_elements() {
        let note = structured(
            PART_NOTE,
            vec![
                DescriptiveValue::typed("issue", "type"),
                structured(
                    "detail",
                    vec![
                        DescriptiveValue::typed("volume", "type"),
                        DescriptiveValue::typed("3", "number"),
                    ],
                ),
                structured(
                    "extent",
                    vec![
                        DescriptiveValue::typed("pages", "unit"),
                        DescriptiveValue::typed("7", "start"),
                    ],
                ),
                structured("text", vec![DescriptiveValue::typed("Suppl.", PART_TEXT)]),
            ],
        );
        let elements = write(&[note]);
        let part = &elements[0];
        assert_eq!(part.attr("type"), Some("issue"));
        let detail = part.child("detail").unwrap();
        assert_eq!(detail.attr("type"), Some("volume"));
        assert_eq!(detail.child_text("number").as_deref(), Some("3"));
        let extent = part.child("extent").unwrap();
        assert_eq!(extent.attr("unit"), Some("pages"));
        assert_eq!(extent.child_text("start").as_deref(), Some("7"));
        assert_eq!(part.child_text("text").as_deref(), Some("Suppl."));
    }

    #[test]
    fn test_plain_part_note_is_not_a_part() {
        let note = DescriptiveValue::typed("pp. 7-9", PART_NOTE);
        assert!(!is_part(&note));
        assert!(write(&[note]).is_empty());
    }
}
