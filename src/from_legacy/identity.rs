//! identityMetadata reader.

use tracing::warn;

use crate::base::{XmlElement, prefixed_druid};
use crate::cocina::{Catalog, CatalogLink, Identification, IdentityFragment, ObjectCategory, ReleaseTag};
use crate::error::{MappingError, Result};
use crate::legacy::Datastream;
use crate::vocab::Vocabulary;

pub(super) fn read(
    vocab: &Vocabulary,
    identity: &XmlElement,
    object_id: &str,
) -> Result<IdentityFragment> {
    let object_type = identity.child_text("objectType").ok_or_else(|| {
        MappingError::unmappable(Datastream::Identity.name(), "objectType is missing")
    })?;
    let category = ObjectCategory::from_legacy(&object_type).ok_or_else(|| {
        MappingError::unmappable(
            Datastream::Identity.name(),
            format!("unknown objectType '{object_type}'"),
        )
    })?;

    let external_identifier = identity
        .child_text("objectId")
        .map(|id| prefixed_druid(&id))
        .unwrap_or_else(|| prefixed_druid(object_id));
    let label = identity.child_text("objectLabel").unwrap_or_default();

    Ok(IdentityFragment {
        external_identifier,
        category,
        label,
        identification: read_identification(vocab, identity),
        release_tags: read_release_tags(identity, object_id),
    })
}

fn read_identification(vocab: &Vocabulary, identity: &XmlElement) -> Identification {
    let mut identification = Identification {
        source_id: identity.child("sourceId").and_then(|source| {
            let namespace = source.attr("source")?;
            Some(format!("{namespace}:{}", source.text()))
        }),
        doi: identity.child_text("doi"),
        ..Default::default()
    };

    for other in identity.children_named("otherId") {
        let Some(name) = other.attr("name") else {
            continue;
        };
        let value = other.text();
        if name == vocab.barcode_other_id() {
            identification.barcode = Some(value);
        } else if let Some(catalog) = vocab.catalog_for_other_id(name).and_then(Catalog::from_name) {
            identification.catalog_links.push(CatalogLink {
                catalog,
                refresh: !catalog.is_previous(),
                record_id: value,
            });
        }
    }
    identification
}

/// `<release to=".." what=".." when=".." who="..">true</release>`
fn read_release_tags(identity: &XmlElement, object_id: &str) -> Vec<ReleaseTag> {
    identity
        .children_named("release")
        .filter_map(|release| {
            let (Some(to), Some(what)) = (release.attr("to"), release.attr("what")) else {
                warn!(object_id, "release tag without to/what skipped");
                return None;
            };
            Some(ReleaseTag {
                to: to.to_string(),
                what: what.to_string(),
                date: release.attr("when").map(str::to_string),
                who: release.attr("who").map(str::to_string),
                release: release.text().eq_ignore_ascii_case("true"),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_identity() {
        let doc = XmlElement::parse(
            r#"<identityMetadata>
                <objectId>druid:bc123df4567</objectId>
                <objectType>collection</objectType>
                <objectLabel>Maps of the world</objectLabel>
                <sourceId source="sul">M0001</sourceId>
                <otherId name="catkey">129483625</otherId>
                <otherId name="previous_catkey">11</otherId>
                <otherId name="barcode">36105010362304</otherId>
                <release to="Searchworks" what="self" when="2016-11-16T22:52:35Z" who="pjreed">true</release>
                <release what="self">false</release>
            </identityMetadata>"#,
        )
        .unwrap();
        let fragment = read(Vocabulary::standard(), &doc, "druid:bc123df4567").unwrap();
        assert_eq!(fragment.category, ObjectCategory::Collection);
        assert_eq!(fragment.label, "Maps of the world");
        assert_eq!(fragment.identification.source_id.as_deref(), Some("sul:M0001"));
        assert_eq!(fragment.identification.barcode.as_deref(), Some("36105010362304"));
        assert_eq!(
            fragment.identification.catalog_links,
            vec![
                CatalogLink {
                    catalog: Catalog::Symphony,
                    refresh: true,
                    record_id: "129483625".to_string()
                },
                CatalogLink {
                    catalog: Catalog::PreviousSymphony,
                    refresh: false,
                    record_id: "11".to_string()
                },
            ]
        );
        assert_eq!(fragment.release_tags.len(), 1);
        assert!(fragment.release_tags[0].release);
        assert_eq!(fragment.release_tags[0].who.as_deref(), Some("pjreed"));
    }

    #[test]
    fn test_unknown_object_type() {
        let doc = XmlElement::parse(
            "<identityMetadata><objectType>workflow</objectType></identityMetadata>",
        )
        .unwrap();
        let err = read(Vocabulary::standard(), &doc, "druid:bc123df4567").unwrap_err();
        assert!(matches!(
            err,
            MappingError::UnmappableDocument { datastream: "identityMetadata", .. }
        ));
    }
}
