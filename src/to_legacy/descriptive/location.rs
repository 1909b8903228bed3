//! purl and access → `location` and `accessCondition`.

use tracing::warn;

use super::{set_authority, set_labels};
use crate::base::XmlElement;
use crate::cocina::{DescriptiveAccessMetadata, DescriptiveValue};
use crate::legacy::mods::{PRIMARY_DISPLAY, REPOSITORY, SHELF_LOCATOR};

/// One `location` per child, then the access conditions.
pub(super) fn write(purl: Option<&str>, access: Option<&DescriptiveAccessMetadata>) -> Vec<XmlElement> {
    let mut elements: Vec<XmlElement> = purl
        .map(|purl| located(XmlElement::text_element("url", purl).with_attr("usage", PRIMARY_DISPLAY)))
        .into_iter()
        .collect();
    let Some(access) = access else {
        return elements;
    };

    for url in &access.url {
        let Some(text) = &url.value else {
            continue;
        };
        let mut element = XmlElement::text_element("url", text.clone());
        if url.is_primary() {
            element.set_attr("usage", PRIMARY_DISPLAY);
        }
        set_labels(&mut element, url);
        elements.push(located(element));
    }
    for contact in &access.access_contact {
        elements.extend(write_physical_location(contact, Some(REPOSITORY)).map(located));
    }
    for place in &access.physical_location {
        let element = if place.kind_is(SHELF_LOCATOR) {
            place
                .value
                .as_ref()
                .map(|text| XmlElement::text_element("shelfLocator", text.clone()))
        } else {
            write_physical_location(place, None)
        };
        elements.extend(element.map(located));
    }
    if !access.digital_location.is_empty() || !access.digital_repository.is_empty() {
        warn!("digital location without a MODS element dropped");
    }
    for note in &access.note {
        let mut condition = XmlElement::new("accessCondition")
            .with_opt_attr("type", note.kind.as_deref())
            .with_opt_attr("xlink:href", note.uri.as_deref());
        if let Some(text) = &note.value {
            condition = condition.with_text(text.clone());
        }
        set_labels(&mut condition, note);
        elements.push(condition);
    }
    elements
}

fn located(child: XmlElement) -> XmlElement {
    XmlElement::new("location").with_child(child)
}

fn write_physical_location(place: &DescriptiveValue, default_kind: Option<&str>) -> Option<XmlElement> {
    let text = place.value.as_deref()?;
    let mut element = XmlElement::text_element("physicalLocation", text)
        .with_opt_attr("type", place.kind.as_deref().or(default_kind));
    set_authority(&mut element, place);
    set_labels(&mut element, place);
    Some(element)
}
