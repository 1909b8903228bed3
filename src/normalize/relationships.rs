//! RELS-EXT rules.
//!
//! Prefixes are rewritten to one fixed set so documents declaring the same
//! namespaces under different prefixes compare equal.

use super::{Context, Rule, remove_empty_elements, strip_namespace_declarations, trim_text};
use crate::base::{XmlElement, fedora_uri, local};

pub(super) const RULES: &[(&str, Rule)] = &[
    ("strip namespace declarations", strip_namespace_declarations),
    ("trim text", trim_text),
    ("drop derived relations", drop_derived_relations),
    ("canonical prefixes", canonical_prefixes),
    ("resource uris", resource_uris),
    ("remove empty elements", remove_empty_elements),
];

/// Relations recomputed by the legacy store.
const DERIVED: [&str; 3] = ["hasModel", "isMemberOf", "conformsTo"];

/// Local name → qualified name.
const QUALIFIED_NAMES: &[(&str, &str)] = &[
    ("RDF", "rdf:RDF"),
    ("Description", "rdf:Description"),
    ("isGovernedBy", "hydra:isGovernedBy"),
    ("referencesAgreement", "hydra:referencesAgreement"),
    ("isMemberOfCollection", "fedora:isMemberOfCollection"),
];

fn drop_derived_relations(rdf: &mut XmlElement, _: &Context<'_>) {
    for description in rdf.elements_mut() {
        description.retain_elements(|e| !DERIVED.contains(&e.local_name()));
    }
}

fn canonical_prefixes(rdf: &mut XmlElement, _: &Context<'_>) {
    super::walk_mut(rdf, &mut |e| {
        if let Some((_, qualified)) = QUALIFIED_NAMES.iter().find(|(l, _)| *l == e.local_name()) {
            if e.name != *qualified {
                e.name = qualified.to_string();
            }
        }
        let renamed: Vec<(String, String)> = e
            .attributes
            .iter()
            .filter(|(k, _)| matches!(local(k), "about" | "resource") && !k.starts_with("rdf:"))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        for (key, value) in renamed {
            e.remove_attr(&key);
            e.set_attr(format!("rdf:{}", local(&key)), value);
        }
    });
}

/// `info:fedora/druid:...` everywhere; the subject is always this object.
fn resource_uris(rdf: &mut XmlElement, context: &Context<'_>) {
    let about = fedora_uri(&context.object_id);
    super::walk_mut(rdf, &mut |e| {
        if e.local_name() == "Description" && e.attr("rdf:about") != Some(about.as_str()) {
            e.set_attr("rdf:about", about.clone());
        }
        if let Some(resource) = e.attr("rdf:resource").map(str::to_string) {
            let canonical = fedora_uri(&resource);
            if canonical != resource {
                e.set_attr("rdf:resource", canonical);
            }
        }
    });
}
