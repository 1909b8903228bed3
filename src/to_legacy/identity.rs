//! identityMetadata writer.

use tracing::warn;

use crate::base::XmlElement;
use crate::cocina::{IdentityFragment, ReleaseTag};
use crate::vocab::Vocabulary;

/// Creator every written identity names.
const OBJECT_CREATOR: &str = "DOR";

pub(super) fn write(vocab: &Vocabulary, identity: &IdentityFragment) -> XmlElement {
    let mut element = XmlElement::new("identityMetadata")
        .with_child(XmlElement::text_element("objectId", identity.external_identifier.clone()))
        .with_child(XmlElement::text_element("objectCreator", OBJECT_CREATOR));
    if !identity.label.is_empty() {
        element.push_child(XmlElement::text_element("objectLabel", identity.label.clone()));
    }
    element.push_child(XmlElement::text_element("objectType", identity.category.legacy()));

    let identification = &identity.identification;
    if let Some(source_id) = &identification.source_id {
        match source_id.split_once(':') {
            Some((namespace, value)) => element.push_child(
                XmlElement::text_element("sourceId", value).with_attr("source", namespace),
            ),
            None => warn!(source_id, "source id without a namespace dropped"),
        }
    }
    for link in &identification.catalog_links {
        match vocab.other_id_for_catalog(link.catalog.name()) {
            Some(name) => element.push_child(
                XmlElement::text_element("otherId", link.record_id.clone()).with_attr("name", name),
            ),
            None => warn!(catalog = link.catalog.name(), "catalog without an otherId name dropped"),
        }
    }
    if let Some(barcode) = &identification.barcode {
        element.push_child(
            XmlElement::text_element("otherId", barcode.clone())
                .with_attr("name", vocab.barcode_other_id()),
        );
    }
    if let Some(doi) = &identification.doi {
        element.push_child(XmlElement::text_element("doi", doi.clone()));
    }
    for tag in &identity.release_tags {
        element.push_child(write_release(tag));
    }
    element
}

fn write_release(tag: &ReleaseTag) -> XmlElement {
    XmlElement::text_element("release", if tag.release { "true" } else { "false" })
        .with_attr("to", tag.to.clone())
        .with_attr("what", tag.what.clone())
        .with_opt_attr("when", tag.date.as_deref())
        .with_opt_attr("who", tag.who.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cocina::{Catalog, CatalogLink, Identification, ObjectCategory};

    #[test]
    fn test_write_identity() {
        let identity = IdentityFragment {
            external_identifier: "druid:bc123df4567".to_string(),
            category: ObjectCategory::Item,
            label: "Stanford Dish".to_string(),
            identification: Identification {
                source_id: Some("sul:dish-1".to_string()),
                catalog_links: vec![CatalogLink {
                    catalog: Catalog::Folio,
                    refresh: true,
                    record_id: "a123".to_string(),
                }],
                barcode: Some("36105010362304".to_string()),
                doi: None,
            },
            release_tags: vec![ReleaseTag {
                to: "Searchworks".to_string(),
                what: "self".to_string(),
                date: None,
                who: Some("pjreed".to_string()),
                release: false,
            }],
        };
        let element = write(Vocabulary::standard(), &identity);
        assert_eq!(element.child_text("objectType").as_deref(), Some("item"));
        let source = element.child("sourceId").unwrap();
        assert_eq!(source.attr("source"), Some("sul"));
        assert_eq!(source.text(), "dish-1");
        let names: Vec<_> = element.children_named("otherId").map(|o| o.attr("name")).collect();
        assert_eq!(names, vec![Some("folio_instance_hrid"), Some("barcode")]);
        let release = element.child("release").unwrap();
        assert_eq!(release.text(), "false");
        assert!(!release.has_attr("when"));
    }
}
