//! `originInfo` → event.

use rustc_hash::FxHashMap;
use tracing::warn;

use super::{alt_rep_groups, read_authority, read_labels, read_terms, value_language};
use crate::base::XmlElement;
use crate::cocina::{Contributor, ContributorType, DescriptiveValue, Event, Source};
use crate::legacy::mods::{DATE_ELEMENTS, EVENT_NOTES, to_canonical};

/// The role every `publisher` carries.
pub(crate) fn publisher_role() -> DescriptiveValue {
    DescriptiveValue {
        value: Some("publisher".to_string()),
        code: Some("pbl".to_string()),
        uri: Some("http://id.loc.gov/vocabulary/relators/pbl".to_string()),
        source: Some(Source {
            code: Some("marcrelator".to_string()),
            uri: Some("http://id.loc.gov/vocabulary/relators/".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub(super) fn read(element: &XmlElement) -> Vec<Event> {
    alt_rep_groups(element.children_named("originInfo"))
        .into_iter()
        .map(|group| {
            let mut events: Vec<Event> = group.into_iter().map(read_event).collect();
            if events.len() == 1 {
                events.remove(0)
            } else {
                Event {
                    parallel_event: events,
                    ..Default::default()
                }
            }
        })
        .collect()
}

fn read_event(origin: &XmlElement) -> Event {
    let mut event = Event {
        kind: origin.attr("eventType").map(str::to_string),
        display_label: origin.attr("displayLabel").map(str::to_string),
        date: read_dates(origin),
        value_language: value_language(origin),
        ..Default::default()
    };

    for child in origin.elements() {
        let name = child.local_name();
        if is_date(name) {
            continue;
        }
        match name {
            "publisher" => {
                let mut value = DescriptiveValue::of(child.text());
                read_authority(child, &mut value);
                read_labels(child, &mut value);
                event.contributor.push(Contributor {
                    kind: Some(ContributorType::Organization),
                    name: vec![value],
                    role: vec![publisher_role()],
                    ..Default::default()
                });
            }
            "place" => event.location.push(read_terms(child, "placeTerm")),
            other => match to_canonical(EVENT_NOTES, other) {
                Some(kind) => {
                    let mut note = DescriptiveValue::typed(child.text(), kind);
                    read_authority(child, &mut note);
                    event.note.push(note);
                }
                None => warn!(element = other, "unmapped originInfo child dropped"),
            },
        }
    }
    event
}

fn is_date(name: &str) -> bool {
    name == "dateOther" || to_canonical(DATE_ELEMENTS, name).is_some()
}

/// Dates in document order. A `point="start"` element opens a range that the
/// next same-named `point="end"` closes.
fn read_dates(origin: &XmlElement) -> Vec<DescriptiveValue> {
    let mut dates: Vec<DescriptiveValue> = Vec::new();
    let mut open_ranges: FxHashMap<String, usize> = FxHashMap::default();

    for element in origin.elements().filter(|e| is_date(e.local_name())) {
        let kind = match element.local_name() {
            "dateOther" => element.attr("type").map(str::to_string),
            name => to_canonical(DATE_ELEMENTS, name).map(str::to_string),
        };
        let range_key = format!("{}|{}", element.local_name(), kind.as_deref().unwrap_or_default());
        let key_date = element.attr("keyDate") == Some("yes");
        let encoding = element.attr("encoding").map(Source::code);

        match element.attr("point") {
            Some(point @ ("start" | "end")) => {
                let part = DescriptiveValue {
                    value: element.text_opt(),
                    kind: Some(point.to_string()),
                    qualifier: element.attr("qualifier").map(str::to_string),
                    ..Default::default()
                };
                let open = if point == "end" {
                    open_ranges.remove(&range_key)
                } else {
                    None
                };
                let index = match open {
                    Some(index) => index,
                    None => {
                        dates.push(DescriptiveValue {
                            kind: kind.clone(),
                            ..Default::default()
                        });
                        let index = dates.len() - 1;
                        if point == "start" {
                            open_ranges.insert(range_key, index);
                        }
                        index
                    }
                };
                let range = &mut dates[index];
                range.structured_value.push(part);
                if range.encoding.is_none() {
                    range.encoding = encoding;
                }
                if key_date {
                    range.status = Some("primary".to_string());
                }
            }
            _ => {
                let mut date = DescriptiveValue {
                    value: element.text_opt(),
                    kind,
                    encoding,
                    qualifier: element.attr("qualifier").map(str::to_string),
                    status: key_date.then(|| "primary".to_string()),
                    ..Default::default()
                };
                read_labels(element, &mut date);
                dates.push(date);
            }
        }
    }
    dates
}
