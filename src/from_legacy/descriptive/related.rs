//! `relatedItem` → related resource.

use tracing::warn;

use super::{primary_status, read_body};
use crate::base::XmlElement;
use crate::cocina::{DescriptiveValue, RelatedResource, Source};
use crate::legacy::mods::{MAX_RELATED_DEPTH, OTHER_RELATION_TYPE, RELATED_TO, RELATED_TYPES, to_canonical};
use crate::vocab::Vocabulary;

pub(super) fn read(vocab: &Vocabulary, element: &XmlElement, depth: usize) -> Vec<RelatedResource> {
    element
        .children_named("relatedItem")
        .filter_map(|item| {
            if depth >= MAX_RELATED_DEPTH {
                warn!(depth, "relatedItem nested too deeply; dropped");
                return None;
            }
            Some(read_related(vocab, item, depth + 1))
        })
        .collect()
}

fn read_related(vocab: &Vocabulary, item: &XmlElement, depth: usize) -> RelatedResource {
    let mut related = read_body(vocab, item, depth);
    related.kind = item
        .attr("type")
        .map(|kind| to_canonical(RELATED_TYPES, kind).unwrap_or(kind).to_string());
    related.display_label = item.attr("displayLabel").map(str::to_string);
    related.status = primary_status(item);

    if let Some(other) = item.attr("otherType") {
        related.note.push(DescriptiveValue {
            value: Some(other.to_string()),
            kind: Some(OTHER_RELATION_TYPE.to_string()),
            uri: item.attr("otherTypeURI").map(str::to_string),
            source: item.attr("otherTypeAuth").map(Source::code),
            ..Default::default()
        });
        if related.kind.is_none() {
            related.kind = Some(RELATED_TO.to_string());
        }
    }
    related
}
