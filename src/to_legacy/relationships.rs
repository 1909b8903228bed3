//! RELS-EXT writer.

use crate::base::{XmlElement, fedora_uri};
use crate::cocina::Relationships;

const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
const FEDORA_NS: &str = "info:fedora/fedora-system:def/relations-external#";
const HYDRA_NS: &str = "http://projecthydra.org/ns/relations#";

pub(super) fn write(object_id: &str, relationships: &Relationships) -> XmlElement {
    let mut description =
        XmlElement::new("rdf:Description").with_attr("rdf:about", fedora_uri(object_id));
    if let Some(policy) = &relationships.has_admin_policy {
        description.push_child(relation("hydra:isGovernedBy", policy));
    }
    for collection in &relationships.is_member_of {
        description.push_child(relation("fedora:isMemberOfCollection", collection));
    }
    if let Some(agreement) = &relationships.has_agreement {
        description.push_child(relation("hydra:referencesAgreement", agreement));
    }
    XmlElement::new("rdf:RDF")
        .with_attr("xmlns:rdf", RDF_NS)
        .with_attr("xmlns:fedora", FEDORA_NS)
        .with_attr("xmlns:hydra", HYDRA_NS)
        .with_child(description)
}

fn relation(name: &str, target: &str) -> XmlElement {
    XmlElement::new(name).with_attr("rdf:resource", fedora_uri(target))
}
