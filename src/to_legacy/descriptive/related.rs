//! related resource → `relatedItem`.

use tracing::warn;

use super::{Body, set_usage, write_body};
use crate::base::XmlElement;
use crate::cocina::{DescriptiveValue, RelatedResource};
use crate::legacy::mods::{MAX_RELATED_DEPTH, OTHER_RELATION_TYPE, RELATED_TO, RELATED_TYPES, to_mods};
use crate::vocab::Vocabulary;

pub(super) fn write(vocab: &Vocabulary, related: &[RelatedResource], depth: usize) -> Vec<XmlElement> {
    if depth >= MAX_RELATED_DEPTH && !related.is_empty() {
        warn!(depth, "related resource nested too deeply; dropped");
        return Vec::new();
    }
    related
        .iter()
        .map(|resource| write_related(vocab, resource, depth + 1))
        .collect()
}

fn write_related(vocab: &Vocabulary, related: &RelatedResource, depth: usize) -> XmlElement {
    let (other_types, notes): (Vec<DescriptiveValue>, Vec<DescriptiveValue>) = related
        .note
        .iter()
        .cloned()
        .partition(|note| note.kind_is(OTHER_RELATION_TYPE));

    let kind = related
        .kind
        .as_deref()
        .filter(|kind| *kind != RELATED_TO)
        .map(|kind| to_mods(RELATED_TYPES, kind).unwrap_or(kind));
    let mut item = XmlElement::new("relatedItem")
        .with_opt_attr("type", kind)
        .with_opt_attr("displayLabel", related.display_label.as_deref());
    set_usage(&mut item, related.status.as_deref());

    if let Some(other) = other_types.first() {
        item = item
            .with_opt_attr("otherType", other.value.as_deref())
            .with_opt_attr("otherTypeURI", other.uri.as_deref())
            .with_opt_attr("otherTypeAuth", other.source_code());
    }

    let body = Body {
        note: &notes,
        ..Body::from(related)
    };
    write_body(vocab, body, &mut item, depth);
    item
}
