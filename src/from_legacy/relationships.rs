//! RELS-EXT reader.

use crate::base::{FEDORA_URI_PREFIX, XmlElement, prefixed_druid};
use crate::cocina::Relationships;
use crate::error::Result;

pub(super) fn read(rdf: &XmlElement) -> Result<Relationships> {
    let mut relationships = Relationships::default();
    for description in rdf.children_named("Description") {
        for relation in description.elements() {
            let Some(target) = resource(relation) else {
                continue;
            };
            match relation.local_name() {
                "isGovernedBy" => relationships.has_admin_policy = Some(target),
                "isMemberOfCollection" => {
                    if !relationships.is_member_of.contains(&target) {
                        relationships.is_member_of.push(target);
                    }
                }
                "referencesAgreement" => relationships.has_agreement = Some(target),
                _ => {}
            }
        }
    }
    Ok(relationships)
}

/// Prefixed object id of a relation's `rdf:resource`.
fn resource(relation: &XmlElement) -> Option<String> {
    let uri = relation
        .attributes
        .iter()
        .find(|(key, _)| crate::base::local(key) == "resource")
        .map(|(_, value)| value.as_str())?;
    let id = uri.strip_prefix(FEDORA_URI_PREFIX).unwrap_or(uri);
    Some(prefixed_druid(id))
}
