//! event → `originInfo`.

use tracing::warn;

use super::{Groups, set_authority, set_labels, set_value_language, write_terms};
use crate::base::XmlElement;
use crate::cocina::{DescriptiveValue, Event};
use crate::legacy::mods::{DATE_ELEMENTS, EVENT_NOTES, to_mods};

pub(super) fn write(events: &[Event], groups: &mut Groups) -> Vec<XmlElement> {
    let mut elements = Vec::new();
    for event in events {
        if event.parallel_event.is_empty() {
            elements.push(write_event(event));
            continue;
        }
        let group = groups.next();
        for member in &event.parallel_event {
            elements.push(write_event(member).with_attr("altRepGroup", group.clone()));
        }
    }
    elements
}

fn write_event(event: &Event) -> XmlElement {
    let mut origin = XmlElement::new("originInfo")
        .with_opt_attr("eventType", event.kind.as_deref())
        .with_opt_attr("displayLabel", event.display_label.as_deref());
    if let Some(language) = &event.value_language {
        set_value_language(&mut origin, language);
    }

    for date in &event.date {
        for element in write_date(date) {
            origin.push_child(element);
        }
    }
    for contributor in &event.contributor {
        if !contributor.has_role("publisher", "pbl") {
            warn!("event contributor other than a publisher dropped");
            continue;
        }
        let Some(name) = contributor.name.first() else {
            continue;
        };
        let Some(text) = &name.value else {
            continue;
        };
        let mut publisher = XmlElement::text_element("publisher", text.clone());
        set_authority(&mut publisher, name);
        set_labels(&mut publisher, name);
        origin.push_child(publisher);
    }
    for place in &event.location {
        origin.push_child(write_terms("place", "placeTerm", place));
    }
    for note in &event.note {
        let (Some(kind), Some(text)) = (note.kind.as_deref(), &note.value) else {
            warn!("untyped event note dropped");
            continue;
        };
        match to_mods(EVENT_NOTES, kind) {
            Some(name) => {
                let mut element = XmlElement::text_element(name, text.clone());
                set_authority(&mut element, note);
                origin.push_child(element);
            }
            None => warn!(kind, "event note without a MODS element dropped"),
        }
    }
    origin
}

/// A plain date is one element; a range is one element per end point.
fn write_date(date: &DescriptiveValue) -> Vec<XmlElement> {
    let date_element = |text: &str| {
        let element = match date.kind.as_deref() {
            Some(kind) => match to_mods(DATE_ELEMENTS, kind) {
                Some(name) => XmlElement::text_element(name, text),
                None => XmlElement::text_element("dateOther", text).with_attr("type", kind),
            },
            None => XmlElement::text_element("dateOther", text),
        };
        element.with_opt_attr("encoding", date.encoding_code())
    };

    if date.structured_value.is_empty() {
        let Some(text) = &date.value else {
            return Vec::new();
        };
        let mut element = date_element(text).with_opt_attr("qualifier", date.qualifier.as_deref());
        if date.is_primary() {
            element.set_attr("keyDate", "yes");
        }
        set_labels(&mut element, date);
        return vec![element];
    }

    date.structured_value
        .iter()
        .filter_map(|part| {
            let text = part.value.as_deref()?;
            Some(
                date_element(text)
                    .with_opt_attr("point", part.kind.as_deref())
                    .with_opt_attr("qualifier", part.qualifier.as_deref()),
            )
        })
        .enumerate()
        .map(|(index, mut element)| {
            if index == 0 && date.is_primary() {
                element.set_attr("keyDate", "yes");
            }
            element
        })
        .collect()
}
