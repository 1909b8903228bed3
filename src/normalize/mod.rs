//! Normalization: rewrite a legacy document so that documents differing only
//! in insignificant ways become equal.
//!
//! Each datastream has an ordered list of named rules. The list is applied
//! repeatedly until a full pass leaves the tree unchanged, which makes
//! normalization a fixed point: normalizing a normalized document is a no-op.
//! A rule whose precondition does not hold does nothing; rules never fail.

mod content;
mod embargo;
mod identity;
mod mods;
mod relationships;
mod rights;

use tracing::trace;

use crate::base::{XmlElement, XmlNode, prefixed_druid, purl_for};
use crate::legacy::Datastream;
use crate::vocab::Vocabulary;

/// Upper bound on rule passes; real documents settle in two.
const MAX_PASSES: usize = 8;

/// Inputs shared by every rule.
pub struct Context<'v> {
    pub vocab: &'v Vocabulary,
    /// Prefixed object identifier.
    pub object_id: String,
    /// The object's own persistent URL.
    pub purl: String,
}

/// A rewrite applied in place.
pub type Rule = fn(&mut XmlElement, &Context<'_>);

/// Normalizes legacy documents against a vocabulary.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer<'v> {
    vocab: &'v Vocabulary,
}

impl<'v> Normalizer<'v> {
    pub fn new(vocab: &'v Vocabulary) -> Self {
        Self { vocab }
    }

    /// Normalize a document; the datastream is chosen by the root element.
    /// Documents with an unrecognized root only get the generic rules.
    pub fn normalize(&self, document: &XmlElement, object_id: &str) -> XmlElement {
        let context = Context {
            vocab: self.vocab,
            object_id: prefixed_druid(object_id),
            purl: purl_for(object_id),
        };
        let rules = match Datastream::from_root(document.local_name()) {
            Some(Datastream::Descriptive) => mods::RULES,
            Some(Datastream::Identity) => identity::RULES,
            Some(Datastream::Rights) => rights::RULES,
            Some(Datastream::Embargo) => embargo::RULES,
            Some(Datastream::Content) => content::RULES,
            Some(Datastream::Relationships) => relationships::RULES,
            None => GENERIC_RULES,
        };

        let mut normalized = document.clone();
        for pass in 0..MAX_PASSES {
            let before = normalized.clone();
            for (name, rule) in rules {
                let snapshot = normalized.clone();
                rule(&mut normalized, &context);
                if normalized != snapshot {
                    trace!(rule = name, pass, "normalization rule rewrote document");
                }
            }
            if normalized == before {
                break;
            }
        }
        normalized
    }
}

impl Default for Normalizer<'static> {
    fn default() -> Self {
        Self::new(Vocabulary::standard())
    }
}

/// Normalize with the standard vocabulary.
pub fn normalize(document: &XmlElement, object_id: &str) -> XmlElement {
    Normalizer::default().normalize(document, object_id)
}

const GENERIC_RULES: &[(&str, Rule)] = &[
    ("strip presentation attributes", strip_presentation_attributes),
    ("trim text", trim_text),
    ("remove empty elements", remove_empty_elements),
];

// ============================================================================
// SHARED RULES
// ============================================================================

/// Drop `xml:space` and attributes whose value is blank.
pub(crate) fn strip_presentation_attributes(element: &mut XmlElement, _: &Context<'_>) {
    strip_attributes_where(element, &|key, value| {
        key == "xml:space" || value.trim().is_empty()
    });
}

/// Drop namespace declarations and schema locations.
pub(crate) fn strip_namespace_declarations(element: &mut XmlElement, _: &Context<'_>) {
    strip_attributes_where(element, &|key, _| {
        key == "xmlns" || key.starts_with("xmlns:") || key == "xsi:schemaLocation"
    });
}

fn strip_attributes_where(element: &mut XmlElement, drop: &dyn Fn(&str, &str) -> bool) {
    element.attributes.retain(|k, v| !drop(k, v));
    for child in element.elements_mut() {
        strip_attributes_where(child, drop);
    }
}

/// Trim text nodes and drop blank ones.
pub(crate) fn trim_text(element: &mut XmlElement, _: &Context<'_>) {
    trim_text_nodes(element);
}

fn trim_text_nodes(element: &mut XmlElement) {
    element.children.retain_mut(|node| match node {
        XmlNode::Text(text) => {
            if text.trim().len() != text.len() {
                *text = text.trim().to_string();
            }
            !text.is_empty()
        }
        XmlNode::Element(child) => {
            trim_text_nodes(child);
            true
        }
    });
}

/// Remove empty elements bottom-up; the root is kept.
pub(crate) fn remove_empty_elements(element: &mut XmlElement, _: &Context<'_>) {
    remove_empty_where(element, &|_| false);
}

/// Remove empty elements bottom-up, except those `keep` protects.
pub(crate) fn remove_empty_where(element: &mut XmlElement, keep: &dyn Fn(&XmlElement) -> bool) {
    for child in element.elements_mut() {
        remove_empty_where(child, keep);
    }
    element.retain_elements(|child| !child.is_empty() || keep(child));
}

/// Apply `f` to every element in the tree, parents before children.
pub(crate) fn walk_mut(element: &mut XmlElement, f: &mut dyn FnMut(&mut XmlElement)) {
    f(element);
    for child in element.elements_mut() {
        walk_mut(child, f);
    }
}
