//! form → `typeOfResource`, `genre`, `physicalDescription`; note → the note
//! elements.

use tracing::warn;

use super::parts::is_part;
use super::{Groups, set_authority, set_labels, set_usage, write_parallel};
use crate::base::XmlElement;
use crate::cocina::DescriptiveValue;
use crate::legacy::mods::{
    ABSTRACT_TYPES, MODS_RESOURCE_TYPES, PHYSICAL_PARTS, RESOURCE_TYPE_FLAGS, to_mods,
};

pub(super) fn write_forms(forms: &[DescriptiveValue], groups: &mut Groups) -> Vec<XmlElement> {
    let mut resource_types: Vec<XmlElement> = Vec::new();
    let mut genres = Vec::new();
    let mut physical = Vec::new();
    let mut flat_physical = XmlElement::new("physicalDescription");

    for form in forms {
        if is_resource_type(form) {
            write_resource_type(form, &mut resource_types);
        } else if !form.grouped_value.is_empty() {
            let mut description = XmlElement::new("physicalDescription");
            for part in &form.grouped_value {
                if let Some(element) = write_physical_part(part) {
                    description.push_child(element);
                }
            }
            set_labels(&mut description, form);
            physical.push(description);
        } else if let Some(element) = form
            .kind
            .as_deref()
            .filter(|kind| to_mods(PHYSICAL_PARTS, kind).is_some())
            .and_then(|_| write_physical_part(form))
        {
            flat_physical.push_child(element);
        } else {
            genres.extend(write_parallel(form, groups, write_genre));
        }
    }

    if flat_physical.has_element_children() {
        physical.push(flat_physical);
    }
    resource_types.into_iter().chain(genres).chain(physical).collect()
}

fn is_resource_type(form: &DescriptiveValue) -> bool {
    form.kind_is("resource type") && form.source_value() == Some(MODS_RESOURCE_TYPES)
}

/// A bare flag form marks the `typeOfResource` before it; a flag with nothing
/// before it stands on an empty element.
fn write_resource_type(form: &DescriptiveValue, resource_types: &mut Vec<XmlElement>) {
    let Some(text) = form.value.as_deref() else {
        return;
    };
    let is_flag = RESOURCE_TYPE_FLAGS.contains(&text)
        && form.source_code().is_none()
        && form.status.is_none()
        && form.display_label.is_none();
    if is_flag {
        match resource_types.last_mut() {
            Some(last) if !last.has_attr(text) => last.set_attr(text, "yes"),
            _ => resource_types.push(XmlElement::new("typeOfResource").with_attr(text, "yes")),
        }
        return;
    }
    let mut element = XmlElement::text_element("typeOfResource", text);
    if let Some(code) = form.source_code() {
        element.set_attr("authority", code);
    }
    set_labels(&mut element, form);
    set_usage(&mut element, form.status.as_deref());
    resource_types.push(element);
}

fn write_genre(form: &DescriptiveValue) -> Option<XmlElement> {
    let text = form.value.as_deref()?;
    let mut genre = XmlElement::text_element("genre", text)
        .with_opt_attr("type", form.kind.as_deref().filter(|kind| *kind != "genre"));
    set_authority(&mut genre, form);
    set_labels(&mut genre, form);
    set_usage(&mut genre, form.status.as_deref());
    Some(genre)
}

fn write_physical_part(part: &DescriptiveValue) -> Option<XmlElement> {
    let kind = part.kind.as_deref()?;
    let Some(name) = to_mods(PHYSICAL_PARTS, kind) else {
        warn!(kind, "physical description part without a MODS element dropped");
        return None;
    };
    let mut element = XmlElement::text_element(name, part.value.as_deref()?);
    set_authority(&mut element, part);
    set_labels(&mut element, part);
    Some(element)
}

// ============================================================================
// NOTES
// ============================================================================

pub(super) fn write_notes(notes: &[DescriptiveValue], groups: &mut Groups) -> Vec<XmlElement> {
    notes
        .iter()
        .filter(|note| !is_part(note))
        .flat_map(|note| {
            write_parallel(note, groups, |member| {
                write_note(member, member.kind.as_deref().or(note.kind.as_deref()))
            })
        })
        .collect()
}

fn write_note(note: &DescriptiveValue, kind: Option<&str>) -> Option<XmlElement> {
    let text = note.value.as_deref()?;
    let mut element = match kind {
        Some(kind) if ABSTRACT_TYPES.contains(&kind) => XmlElement::text_element("abstract", text)
            .with_opt_attr("type", Some(kind).filter(|kind| *kind != "abstract")),
        Some("table of contents") => XmlElement::text_element("tableOfContents", text),
        Some("target audience") => XmlElement::text_element("targetAudience", text),
        kind => XmlElement::text_element("note", text).with_opt_attr("type", kind),
    };
    set_authority(&mut element, note);
    set_labels(&mut element, note);
    set_usage(&mut element, note.status.as_deref());
    Some(element)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cocina::Source;

    fn resource_type(value: &str) -> DescriptiveValue {
        DescriptiveValue {
            value: Some(value.to_string()),
            kind: Some("resource type".to_string()),
            source: Some(Source::value(MODS_RESOURCE_TYPES)),
            ..Default::default()
        }
    }

    #[test]
    fn test_resource_type_flags() {
        let forms = [resource_type("text"), resource_type("manuscript")];
        let elements = write_forms(&forms, &mut Groups::default());
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].text(), "text");
        assert_eq!(elements[0].attr("manuscript"), Some("yes"));

        let elements = write_forms(&[resource_type("collection")], &mut Groups::default());
        assert_eq!(elements[0].attr("collection"), Some("yes"));
        assert!(elements[0].text_opt().is_none());
    }

    #[test]
    fn test_genre_and_physical_description() {
        let forms = [
            DescriptiveValue::typed("Manuscripts", "genre"),
            DescriptiveValue::typed("Gothic", "style"),
            DescriptiveValue::typed("1 map", "extent"),
            DescriptiveValue::typed("born digital", "digital origin"),
        ];
        let elements = write_forms(&forms, &mut Groups::default());
        let names: Vec<_> = elements.iter().map(|e| e.local_name()).collect();
        assert_eq!(names, vec!["genre", "genre", "physicalDescription"]);
        assert!(!elements[0].has_attr("type"));
        assert_eq!(elements[1].attr("type"), Some("style"));
        assert_eq!(elements[2].child_text("extent").as_deref(), Some("1 map"));
        assert_eq!(elements[2].child_text("digitalOrigin").as_deref(), Some("born digital"));
    }

    #[test]
    fn test_grouped_physical_description() {
        let form = DescriptiveValue {
            grouped_value: vec![DescriptiveValue::typed("ink", "form")],
            display_label: Some("Medium".to_string()),
            ..Default::default()
        };
        let elements = write_forms(&[form], &mut Groups::default());
        assert_eq!(elements[0].attr("displayLabel"), Some("Medium"));
        assert_eq!(elements[0].child_text("form").as_deref(), Some("ink"));
    }

    #[test]
    fn test_notes() {
        let notes = [
            DescriptiveValue::typed("About maps.", "abstract"),
            DescriptiveValue::typed("Short.", "summary"),
            DescriptiveValue::typed("1. Intro", "table of contents"),
            DescriptiveValue::typed("Cite me.", "preferred citation"),
            DescriptiveValue::of("Plain."),
        ];
        let elements = write_notes(&notes, &mut Groups::default());
        let shapes: Vec<_> = elements.iter().map(|e| (e.local_name(), e.attr("type"))).collect();
        assert_eq!(
            shapes,
            vec![
                ("abstract", None),
                ("abstract", Some("summary")),
                ("tableOfContents", None),
                ("note", Some("preferred citation")),
                ("note", None),
            ]
        );
    }
}
