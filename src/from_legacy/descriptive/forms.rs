//! Forms (`typeOfResource`, `genre`, `physicalDescription`) and notes.

use tracing::warn;

use super::{alt_rep_groups, parallel, primary_status, read_authority, read_labels};
use crate::base::XmlElement;
use crate::cocina::{DescriptiveValue, Source};
use crate::legacy::mods::{MODS_RESOURCE_TYPES, PHYSICAL_PARTS, RESOURCE_TYPE_FLAGS, to_canonical};

pub(super) fn read_forms(element: &XmlElement) -> Vec<DescriptiveValue> {
    let mut forms = Vec::new();
    for type_of_resource in element.children_named("typeOfResource") {
        if let Some(text) = type_of_resource.text_opt() {
            let mut form = resource_type(text);
            read_authority(type_of_resource, &mut form);
            if let Some(source) = form.source.as_mut() {
                source.value = Some(MODS_RESOURCE_TYPES.to_string());
            }
            read_labels(type_of_resource, &mut form);
            form.status = primary_status(type_of_resource);
            forms.push(form);
        }
        for flag in RESOURCE_TYPE_FLAGS {
            if type_of_resource.attr(flag) == Some("yes") {
                forms.push(resource_type(flag.to_string()));
            }
        }
    }

    for group in alt_rep_groups(element.children_named("genre")) {
        forms.push(parallel(group.into_iter().map(read_genre).collect()));
    }

    let physical: Vec<&XmlElement> = element.children_named("physicalDescription").collect();
    match physical.as_slice() {
        [only] if only.attributes.is_empty() => forms.extend(physical_parts(only)),
        _ => {
            for description in physical {
                let mut form = DescriptiveValue {
                    grouped_value: physical_parts(description),
                    ..Default::default()
                };
                read_labels(description, &mut form);
                forms.push(form);
            }
        }
    }
    forms
}

fn resource_type(value: String) -> DescriptiveValue {
    DescriptiveValue {
        value: Some(value),
        kind: Some("resource type".to_string()),
        source: Some(Source::value(MODS_RESOURCE_TYPES)),
        ..Default::default()
    }
}

fn read_genre(genre: &XmlElement) -> DescriptiveValue {
    let mut form = DescriptiveValue::typed(genre.text(), genre.attr("type").unwrap_or("genre"));
    read_authority(genre, &mut form);
    read_labels(genre, &mut form);
    form.status = primary_status(genre);
    form
}

fn physical_parts(description: &XmlElement) -> Vec<DescriptiveValue> {
    description
        .elements()
        .filter_map(|part| match to_canonical(PHYSICAL_PARTS, part.local_name()) {
            Some(kind) => {
                let mut form = DescriptiveValue::typed(part.text(), kind);
                read_authority(part, &mut form);
                read_labels(part, &mut form);
                Some(form)
            }
            None => {
                warn!(element = %part.name, "unmapped physicalDescription child dropped");
                None
            }
        })
        .collect()
}

// ============================================================================
// NOTES
// ============================================================================

/// Note-like elements and the note type each implies when untyped.
const NOTE_ELEMENTS: [(&str, Option<&str>); 4] = [
    ("abstract", Some("abstract")),
    ("tableOfContents", Some("table of contents")),
    ("targetAudience", Some("target audience")),
    ("note", None),
];

pub(super) fn read_notes(element: &XmlElement) -> Vec<DescriptiveValue> {
    let mut notes = Vec::new();
    for (name, implied) in NOTE_ELEMENTS {
        for group in alt_rep_groups(element.children_named(name)) {
            let members: Vec<DescriptiveValue> = group
                .into_iter()
                .map(|note| {
                    let kind = match (name, note.attr("type")) {
                        ("abstract" | "note", Some(kind)) => Some(kind),
                        _ => implied,
                    };
                    let mut value = DescriptiveValue {
                        value: note.text_opt(),
                        kind: kind.map(str::to_string),
                        status: primary_status(note),
                        ..Default::default()
                    };
                    read_authority(note, &mut value);
                    read_labels(note, &mut value);
                    value
                })
                .collect();
            let kind = members[0].kind.clone();
            let mut note = parallel(members);
            if !note.parallel_value.is_empty() {
                note.kind = kind;
            }
            notes.push(note);
        }
    }
    notes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mods(body: &str) -> XmlElement {
        XmlElement::parse(&format!("<mods>{body}</mods>")).unwrap()
    }

    #[test]
    fn test_resource_types_and_genres() {
        let forms = read_forms(&mods(
            r#"<typeOfResource manuscript="yes">text</typeOfResource>
               <genre authority="lcgft" valueURI="http://id.loc.gov/authorities/genreForms/gf2014026139">Manuscripts</genre>
               <genre type="style">Gothic</genre>"#,
        ));
        assert_eq!(forms[0].value.as_deref(), Some("text"));
        assert_eq!(forms[0].source_value(), Some(MODS_RESOURCE_TYPES));
        assert_eq!(forms[1].value.as_deref(), Some("manuscript"));
        assert!(forms[2].kind_is("genre"));
        assert_eq!(forms[2].source_code(), Some("lcgft"));
        assert!(forms[3].kind_is("style"));
    }

    #[test]
    fn test_physical_descriptions() {
        let single = read_forms(&mods(
            "<physicalDescription><extent>1 map</extent><digitalOrigin>born digital</digitalOrigin></physicalDescription>",
        ));
        assert_eq!(single.len(), 2);
        assert!(single[0].kind_is("extent"));

        let labeled = read_forms(&mods(
            r#"<physicalDescription displayLabel="Medium"><form>ink</form></physicalDescription>"#,
        ));
        assert_eq!(labeled.len(), 1);
        assert_eq!(labeled[0].display_label.as_deref(), Some("Medium"));
        assert!(labeled[0].grouped_value[0].kind_is("form"));
    }

    #[test]
    fn test_notes() {
        let notes = read_notes(&mods(
            r#"<abstract>About maps.</abstract>
               <abstract type="summary">Short.</abstract>
               <tableOfContents>1. Intro</tableOfContents>
               <note type="preferred citation">Cite me.</note>
               <note>Plain.</note>"#,
        ));
        let kinds: Vec<_> = notes.iter().map(|n| n.kind.as_deref()).collect();
        assert_eq!(
            kinds,
            vec![
                Some("abstract"),
                Some("summary"),
                Some("table of contents"),
                Some("preferred citation"),
                None
            ]
        );
    }
}
