//! `location` and `accessCondition` → purl and access.

use tracing::warn;

use super::{read_authority, read_labels};
use crate::base::{PURL_BASE, XmlElement};
use crate::cocina::{DescriptiveAccessMetadata, DescriptiveValue, RelatedResource};
use crate::legacy::mods::{PRIMARY_DISPLAY, REPOSITORY, SHELF_LOCATOR};

pub(super) fn read(element: &XmlElement, body: &mut RelatedResource) {
    let mut access = DescriptiveAccessMetadata::default();

    for location in element.children_named("location") {
        for child in location.elements() {
            match child.local_name() {
                "url" => {
                    let primary = child.attr("usage") == Some(PRIMARY_DISPLAY);
                    let text = child.text();
                    if primary && body.purl.is_none() && text.starts_with(PURL_BASE) {
                        body.purl = Some(text);
                        continue;
                    }
                    let mut url = DescriptiveValue::of(text);
                    read_labels(child, &mut url);
                    if primary {
                        url.status = Some("primary".to_string());
                    }
                    access.url.push(url);
                }
                "physicalLocation" => {
                    let mut place = DescriptiveValue::of(child.text());
                    read_authority(child, &mut place);
                    read_labels(child, &mut place);
                    place.kind = child.attr("type").map(str::to_string);
                    if place.kind_is(REPOSITORY) {
                        access.access_contact.push(place);
                    } else {
                        access.physical_location.push(place);
                    }
                }
                "shelfLocator" => access
                    .physical_location
                    .push(DescriptiveValue::typed(child.text(), SHELF_LOCATOR)),
                other => warn!(element = other, "unmapped location child dropped"),
            }
        }
    }

    for condition in element.children_named("accessCondition") {
        let mut note = DescriptiveValue {
            value: condition.text_opt(),
            kind: condition.attr("type").map(str::to_string),
            uri: condition.attr("xlink:href").map(str::to_string),
            ..Default::default()
        };
        read_labels(condition, &mut note);
        access.note.push(note);
    }

    if !access.is_empty() {
        body.access = Some(access);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purl_and_access() {
        let mods = XmlElement::parse(
            r#"<mods xmlns:xlink="http://www.w3.org/1999/xlink">
                <location><url usage="primary display">https://purl.stanford.edu/bc123df4567</url></location>
                <location><url displayLabel="Finding aid">https://oac.cdlib.org/findaid/ark:/13030/x</url></location>
                <location><physicalLocation type="repository" authority="naf">Stanford University. Libraries</physicalLocation></location>
                <location><shelfLocator>M0001 Box 1</shelfLocator></location>
                <accessCondition type="use and reproduction">Public domain.</accessCondition>
                <accessCondition type="license" xlink:href="https://creativecommons.org/licenses/by/4.0/"/>
            </mods>"#,
        )
        .unwrap();
        let mut body = RelatedResource::default();
        read(&mods, &mut body);
        assert_eq!(body.purl.as_deref(), Some("https://purl.stanford.edu/bc123df4567"));
        let access = body.access.unwrap();
        assert_eq!(access.url[0].display_label.as_deref(), Some("Finding aid"));
        assert_eq!(access.access_contact[0].source_code(), Some("naf"));
        assert!(access.physical_location[0].kind_is(SHELF_LOCATOR));
        assert_eq!(access.note.len(), 2);
        assert_eq!(
            access.note[1].uri.as_deref(),
            Some("https://creativecommons.org/licenses/by/4.0/")
        );
    }
}
