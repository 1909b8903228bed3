//! identityMetadata rules.

use super::{Context, Rule, remove_empty_elements, strip_presentation_attributes, trim_text};
use crate::base::{XmlElement, XmlNode};

pub(super) const RULES: &[(&str, Rule)] = &[
    ("strip presentation attributes", strip_presentation_attributes),
    ("trim text", trim_text),
    ("drop unmapped elements", drop_unmapped_elements),
    ("drop unlisted other ids", drop_unlisted_other_ids),
    ("object id", object_id),
    ("release flags", release_flags),
    ("remove empty elements", remove_empty_elements),
];

/// Elements with no canonical counterpart. `objectCreator` is regenerated on write.
const UNMAPPED: [&str; 9] = [
    "objectCreator",
    "tag",
    "displayType",
    "adminPolicy",
    "agreementId",
    "citationTitle",
    "citationCreator",
    "objectAdminClass",
    "contentType",
];

fn drop_unmapped_elements(identity: &mut XmlElement, _: &Context<'_>) {
    identity.retain_elements(|e| !UNMAPPED.contains(&e.local_name()));
}

fn drop_unlisted_other_ids(identity: &mut XmlElement, context: &Context<'_>) {
    identity.retain_elements(|e| {
        e.local_name() != "otherId"
            || e.attr("name").is_some_and(|name| context.vocab.is_allowed_other_id(name))
    });
}

fn object_id(identity: &mut XmlElement, context: &Context<'_>) {
    for id in identity.elements_mut().filter(|e| e.local_name() == "objectId") {
        if id.text() != context.object_id {
            id.children = vec![XmlNode::Text(context.object_id.clone())];
        }
    }
}

/// Release flags are `true`/`false` in lower case.
fn release_flags(identity: &mut XmlElement, _: &Context<'_>) {
    for release in identity.elements_mut().filter(|e| e.local_name() == "release") {
        let text = release.text();
        let lower = text.to_lowercase();
        if lower != text && matches!(lower.as_str(), "true" | "false") {
            release.children = vec![XmlNode::Text(lower)];
        }
    }
}
