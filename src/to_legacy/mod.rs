//! Canonical model → legacy XML.
//!
//! The inverse of [`crate::from_legacy`]. Each fragment is written to exactly
//! the datastreams it represents; every other datastream of the target object
//! is left untouched.
//!
//! ```text
//! IdentityFragment ─→ identityMetadata
//! RightsFragment   ─→ rightsMetadata
//! Option<Embargo>  ─→ embargoMetadata
//! ContentFragment  ─→ contentMetadata
//! Description      ─→ mods
//! Relationships    ─→ RELS-EXT
//! RepositoryObject ─→ all of the above
//! ```
//!
//! Writers emit the canonical spelling of each construct. Output is not
//! normalized; comparisons against an original go through the normalizer.

mod content;
mod descriptive;
mod identity;
mod relationships;
mod rights;

use indexmap::IndexMap;
use tracing::debug;

use crate::base::{XmlElement, prefixed_druid};
use crate::cocina::{
    Access, ContentFragment, Description, Dro, Embargo, FileAccess, Fragment, IdentityFragment,
    Identification, ObjectCategory, Relationships, ReleaseTag, RepositoryObject, RightsFragment,
};
use crate::error::Result;
use crate::legacy::{Datastream, LegacyObject};
use crate::vocab::Vocabulary;

/// Writes canonical fragments as legacy datastreams.
#[derive(Debug, Clone, Copy)]
pub struct ToLegacy<'v> {
    vocab: &'v Vocabulary,
}

impl<'v> ToLegacy<'v> {
    pub fn new(vocab: &'v Vocabulary) -> Self {
        Self { vocab }
    }
}

impl Default for ToLegacy<'static> {
    fn default() -> Self {
        Self::new(Vocabulary::standard())
    }
}

impl ToLegacy<'_> {
    // ========================================================================
    // PER-DATASTREAM WRITERS
    // ========================================================================

    pub fn identity(&self, identity: &IdentityFragment) -> XmlElement {
        identity::write(self.vocab, identity)
    }

    pub fn rights(&self, rights: &RightsFragment) -> XmlElement {
        rights::write(&rights.access, &rights.file_access)
    }

    pub fn embargo(&self, embargo: Option<&Embargo>) -> XmlElement {
        rights::write_embargo(embargo)
    }

    /// Fails with `UnsupportedObjectType` for types without a content type.
    pub fn content(&self, content: &ContentFragment, object_id: &str) -> Result<XmlElement> {
        content::write(self.vocab, content, &prefixed_druid(object_id))
    }

    pub fn descriptive(&self, description: &Description) -> XmlElement {
        descriptive::write(self.vocab, description)
    }

    pub fn relationships(&self, object_id: &str, relationships: &Relationships) -> XmlElement {
        relationships::write(&prefixed_druid(object_id), relationships)
    }

    // ========================================================================
    // APPLYING FRAGMENTS
    // ========================================================================

    /// Write a fragment into the datastreams it represents.
    pub fn apply(&self, fragment: &Fragment, legacy: &mut LegacyObject) -> Result<()> {
        let object_id = legacy.pid.clone();
        match fragment {
            Fragment::Identity(identity) => {
                legacy.set(Datastream::Identity, self.identity(identity));
            }
            Fragment::Rights(rights) => legacy.set(Datastream::Rights, self.rights(rights)),
            Fragment::Embargo(embargo) => {
                legacy.set(Datastream::Embargo, self.embargo(embargo.as_ref()));
            }
            Fragment::Content(content) => {
                legacy.set(Datastream::Content, self.content(content, &object_id)?);
            }
            Fragment::Descriptive(description) => {
                legacy.set(Datastream::Descriptive, self.descriptive(description));
            }
            Fragment::Relationships(relationships) => {
                legacy.set(
                    Datastream::Relationships,
                    self.relationships(&object_id, relationships),
                );
            }
            Fragment::Object(object) => self.apply_object(object, legacy)?,
        }
        Ok(())
    }

    /// Write a whole object into a fresh legacy container.
    pub fn write_object(&self, object: &RepositoryObject) -> Result<LegacyObject> {
        let mut legacy = LegacyObject::new(object.external_identifier());
        self.apply_object(object, &mut legacy)?;
        Ok(legacy)
    }

    fn apply_object(&self, object: &RepositoryObject, legacy: &mut LegacyObject) -> Result<()> {
        let object_id = prefixed_druid(object.external_identifier());
        debug!(object_id = %object_id, "writing repository object");

        let parts = ObjectParts::of(object);
        legacy.pid = object_id.clone();
        legacy.version = parts.version;

        legacy.set(
            Datastream::Identity,
            self.identity(&IdentityFragment {
                external_identifier: object_id.clone(),
                category: ObjectCategory::of(object.object_type()),
                label: object.label().to_string(),
                identification: parts.identification.clone(),
                release_tags: parts.release_tags.to_vec(),
            }),
        );
        legacy.set(
            Datastream::Rights,
            rights::write(parts.access, &parts.file_overrides),
        );
        match &parts.access.embargo {
            Some(embargo) => legacy.set(Datastream::Embargo, self.embargo(Some(embargo))),
            None if legacy.embargo.is_some() => {
                legacy.set(Datastream::Embargo, self.embargo(None));
            }
            None => {}
        }
        let structural = parts.dro.filter(|dro| {
            !dro.structural.contains.is_empty() || !dro.structural.has_member_orders.is_empty()
        });
        if let Some(dro) = structural {
            let content = ContentFragment {
                object_type: dro.kind,
                contains: dro.structural.contains.clone(),
                has_member_orders: dro.structural.has_member_orders.clone(),
            };
            legacy.set(Datastream::Content, self.content(&content, &object_id)?);
        }
        if let Some(description) = object.description() {
            legacy.set(Datastream::Descriptive, self.descriptive(description));
        }
        legacy.set(
            Datastream::Relationships,
            self.relationships(&object_id, &parts.relationships),
        );
        Ok(())
    }
}

/// The pieces of an object that feed datastreams, whatever its variant.
struct ObjectParts<'a> {
    version: u32,
    access: &'a Access,
    identification: &'a Identification,
    release_tags: &'a [ReleaseTag],
    relationships: Relationships,
    file_overrides: IndexMap<String, FileAccess>,
    dro: Option<&'a Dro>,
}

impl<'a> ObjectParts<'a> {
    fn of(object: &'a RepositoryObject) -> Self {
        static NO_IDENTIFICATION: Identification = Identification {
            source_id: None,
            catalog_links: Vec::new(),
            barcode: None,
            doi: None,
        };
        match object {
            RepositoryObject::Dro(dro) | RepositoryObject::Agreement(dro) => Self {
                version: dro.version,
                access: &dro.access,
                identification: &dro.identification,
                release_tags: &dro.administrative.release_tags,
                relationships: Relationships {
                    has_admin_policy: Some(dro.administrative.has_admin_policy.clone()),
                    is_member_of: dro.structural.is_member_of.clone(),
                    has_agreement: dro.administrative.has_agreement.clone(),
                },
                file_overrides: file_overrides(dro),
                dro: Some(dro),
            },
            RepositoryObject::Collection(collection) => Self {
                version: collection.version,
                access: &collection.access,
                identification: &collection.identification,
                release_tags: &collection.administrative.release_tags,
                relationships: Relationships {
                    has_admin_policy: Some(collection.administrative.has_admin_policy.clone()),
                    is_member_of: Vec::new(),
                    has_agreement: collection.administrative.has_agreement.clone(),
                },
                file_overrides: IndexMap::new(),
                dro: None,
            },
            RepositoryObject::AdminPolicy(policy) => Self {
                version: policy.version,
                access: &policy.administrative.access_template,
                identification: &NO_IDENTIFICATION,
                release_tags: &policy.administrative.release_tags,
                relationships: Relationships {
                    has_admin_policy: Some(policy.administrative.has_admin_policy.clone()),
                    is_member_of: Vec::new(),
                    has_agreement: policy.administrative.has_agreement.clone(),
                },
                file_overrides: IndexMap::new(),
                dro: None,
            },
        }
    }
}

/// Files whose access differs from what the object grants its files by default.
fn file_overrides(dro: &Dro) -> IndexMap<String, FileAccess> {
    let default: FileAccess = dro.access.rights().file_default().into();
    dro.structural
        .contains
        .iter()
        .flat_map(|file_set| &file_set.structural.contains)
        .filter(|file| file.access != default)
        .map(|file| (file.filename.clone(), file.access))
        .collect()
}
