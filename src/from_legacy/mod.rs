//! Legacy XML → canonical model.
//!
//! One reader per datastream, each producing the fragment that datastream
//! represents; [`FromLegacy::build`] assembles the fragments into a validated
//! [`RepositoryObject`].
//!
//! ```text
//! identityMetadata ─→ IdentityFragment ─┐
//! rightsMetadata   ─→ RightsFragment   ─┤
//! embargoMetadata  ─→ Option<Embargo>  ─┤
//! contentMetadata  ─→ ContentFragment  ─┼─→ build ─→ RepositoryObject
//! mods             ─→ Description      ─┤
//! RELS-EXT         ─→ Relationships    ─┘
//! ```
//!
//! Readers are tolerant of missing optional elements (absent in, absent
//! out) and fail with `UnmappableDocument` only when a discriminator the
//! object cannot do without is missing or unknown.

mod content;
mod descriptive;
mod identity;
mod relationships;
mod rights;

use tracing::debug;

use crate::base::{XmlElement, prefixed_druid};
use crate::cocina::{
    AdminPolicy, AdminPolicyAdministrative, Administrative, COCINA_VERSION, Collection,
    ContentFragment, Description, DescriptiveValue, Dro, Embargo, Fragment, IdentityFragment,
    ObjectCategory, ObjectType, RepositoryObject, Relationships, RightsFragment, Structural,
};
use crate::error::{MappingError, Result};
use crate::ids::{IdGenerator, SuffixSource, UuidSuffix};
use crate::legacy::{Datastream, LegacyObject};
use crate::vocab::Vocabulary;

/// Reads legacy datastreams into canonical fragments.
pub struct FromLegacy<'v, S: SuffixSource = UuidSuffix> {
    vocab: &'v Vocabulary,
    ids: IdGenerator<S>,
}

impl<'v> FromLegacy<'v> {
    pub fn new(vocab: &'v Vocabulary) -> Self {
        Self {
            vocab,
            ids: IdGenerator::new(),
        }
    }
}

impl Default for FromLegacy<'static> {
    fn default() -> Self {
        Self::new(Vocabulary::standard())
    }
}

impl<'v, S: SuffixSource> FromLegacy<'v, S> {
    /// Use an injected identifier generator (tests pin its random source).
    pub fn with_ids(vocab: &'v Vocabulary, ids: IdGenerator<S>) -> Self {
        Self { vocab, ids }
    }

    // ========================================================================
    // PER-DATASTREAM READERS
    // ========================================================================

    pub fn identity(&self, document: &XmlElement, object_id: &str) -> Result<IdentityFragment> {
        debug!(object_id, "mapping identityMetadata");
        expect_root(document, Datastream::Identity)?;
        identity::read(self.vocab, document, object_id)
    }

    pub fn rights(&self, document: &XmlElement) -> Result<RightsFragment> {
        expect_root(document, Datastream::Rights)?;
        rights::read(document)
    }

    pub fn embargo(&self, document: &XmlElement) -> Result<Option<Embargo>> {
        expect_root(document, Datastream::Embargo)?;
        rights::read_embargo(document)
    }

    pub fn content(&mut self, document: &XmlElement, object_id: &str) -> Result<ContentFragment> {
        debug!(object_id, "mapping contentMetadata");
        expect_root(document, Datastream::Content)?;
        content::read(self.vocab, &mut self.ids, document, object_id)
    }

    /// Map a MODS document. Without a title the object label stands in; with
    /// neither the document is unmappable.
    pub fn descriptive(
        &self,
        document: &XmlElement,
        object_id: &str,
        label: Option<&str>,
    ) -> Result<Description> {
        debug!(object_id, "mapping descMetadata");
        expect_root(document, Datastream::Descriptive)?;
        let mut description = descriptive::read(self.vocab, document);
        if description.title.is_empty() {
            description.title = fallback_title(object_id, label)?;
        }
        Ok(description)
    }

    pub fn relationships(&self, document: &XmlElement) -> Result<Relationships> {
        expect_root(document, Datastream::Relationships)?;
        relationships::read(document)
    }

    /// Read one datastream into the fragment that represents it.
    pub fn build_fragment(&mut self, document: &XmlElement, object_id: &str) -> Result<Fragment> {
        let datastream = Datastream::from_root(document.local_name()).ok_or_else(|| {
            MappingError::unmappable("unknown", format!("unrecognized root <{}>", document.name))
        })?;
        Ok(match datastream {
            Datastream::Identity => Fragment::Identity(self.identity(document, object_id)?),
            Datastream::Rights => Fragment::Rights(self.rights(document)?),
            Datastream::Embargo => Fragment::Embargo(self.embargo(document)?),
            Datastream::Content => Fragment::Content(self.content(document, object_id)?),
            Datastream::Descriptive => {
                Fragment::Descriptive(Box::new(self.descriptive(document, object_id, None)?))
            }
            Datastream::Relationships => Fragment::Relationships(self.relationships(document)?),
        })
    }

    // ========================================================================
    // WHOLE OBJECTS
    // ========================================================================

    /// Assemble and validate a repository object from every datastream present.
    pub fn build(&mut self, legacy: &LegacyObject) -> Result<RepositoryObject> {
        let pid = prefixed_druid(&legacy.pid);
        debug!(object_id = %pid, "building repository object");

        let identity_doc = legacy.identity.as_ref().ok_or_else(|| {
            MappingError::unmappable(Datastream::Identity.name(), "datastream is missing")
        })?;
        let identity = self.identity(identity_doc, &pid)?;

        let mut rights = match &legacy.rights {
            Some(document) => self.rights(document)?,
            None => RightsFragment::default(),
        };
        rights.access.embargo = match &legacy.embargo {
            Some(document) => self.embargo(document)?,
            None => None,
        };
        let relationships = match &legacy.relationships {
            Some(document) => self.relationships(document)?,
            None => Relationships::default(),
        };
        let description = legacy
            .descriptive
            .as_ref()
            .map(|document| self.descriptive(document, &pid, Some(&identity.label)))
            .transpose()?;
        let version = legacy.version.max(1);

        let object = match identity.category {
            ObjectCategory::AdminPolicy => RepositoryObject::AdminPolicy(AdminPolicy {
                cocina_version: COCINA_VERSION.to_string(),
                kind: ObjectType::AdminPolicy,
                external_identifier: identity.external_identifier,
                label: identity.label,
                version,
                administrative: AdminPolicyAdministrative {
                    has_admin_policy: governing_policy(&relationships)?,
                    has_agreement: relationships.has_agreement,
                    access_template: rights.access,
                    release_tags: identity.release_tags,
                },
                description,
            }),
            ObjectCategory::Collection => RepositoryObject::Collection(Collection {
                cocina_version: COCINA_VERSION.to_string(),
                kind: ObjectType::Collection,
                administrative: Administrative {
                    has_admin_policy: governing_policy(&relationships)?,
                    release_tags: identity.release_tags,
                    has_agreement: relationships.has_agreement,
                },
                description: or_fallback(description, &identity.external_identifier, &identity.label)?,
                external_identifier: identity.external_identifier,
                label: identity.label,
                version,
                access: rights.access,
                identification: identity.identification,
            }),
            ObjectCategory::Item | ObjectCategory::Agreement => {
                let content = match (&legacy.content, identity.category) {
                    (Some(document), ObjectCategory::Item) => Some(self.content(document, &pid)?),
                    _ => None,
                };
                let (kind, structural) = match content {
                    Some(content) => {
                        let structural = Structural {
                            contains: content.contains,
                            has_member_orders: content.has_member_orders,
                            is_member_of: relationships.is_member_of.clone(),
                        };
                        (content.object_type, structural)
                    }
                    None => {
                        let kind = if identity.category == ObjectCategory::Agreement {
                            ObjectType::Agreement
                        } else {
                            ObjectType::Object
                        };
                        let structural = Structural {
                            is_member_of: relationships.is_member_of.clone(),
                            ..Default::default()
                        };
                        (kind, structural)
                    }
                };
                let mut dro = Dro {
                    cocina_version: COCINA_VERSION.to_string(),
                    kind,
                    administrative: Administrative {
                        has_admin_policy: governing_policy(&relationships)?,
                        release_tags: identity.release_tags,
                        has_agreement: relationships.has_agreement,
                    },
                    description: or_fallback(
                        description,
                        &identity.external_identifier,
                        &identity.label,
                    )?,
                    external_identifier: identity.external_identifier,
                    label: identity.label,
                    version,
                    access: rights.access,
                    identification: identity.identification,
                    structural,
                };
                apply_file_access(&mut dro, &rights.file_access);
                if identity.category == ObjectCategory::Agreement {
                    RepositoryObject::Agreement(dro)
                } else {
                    RepositoryObject::Dro(dro)
                }
            }
        };

        object.validate()?;
        Ok(object)
    }
}

fn expect_root(document: &XmlElement, datastream: Datastream) -> Result<()> {
    if document.local_name() == datastream.root() {
        Ok(())
    } else {
        Err(MappingError::unmappable(
            datastream.name(),
            format!("expected <{}>, found <{}>", datastream.root(), document.name),
        ))
    }
}

fn governing_policy(relationships: &Relationships) -> Result<String> {
    relationships.has_admin_policy.clone().ok_or_else(|| {
        MappingError::unmappable(Datastream::Relationships.name(), "no governing admin policy")
    })
}

fn fallback_title(object_id: &str, label: Option<&str>) -> Result<Vec<DescriptiveValue>> {
    match label.map(str::trim).filter(|l| !l.is_empty()) {
        Some(label) => {
            tracing::warn!(object_id, "descMetadata has no title; using the object label");
            Ok(vec![DescriptiveValue::of(label)])
        }
        None => Err(MappingError::unmappable(
            Datastream::Descriptive.name(),
            "no title and no object label",
        )),
    }
}

fn or_fallback(description: Option<Description>, object_id: &str, label: &str) -> Result<Description> {
    match description {
        Some(description) => Ok(description),
        None => Ok(Description {
            title: fallback_title(object_id, Some(label))?,
            ..Default::default()
        }),
    }
}

/// Files take the object's default access unless rights metadata names them.
fn apply_file_access(
    dro: &mut Dro,
    overrides: &indexmap::IndexMap<String, crate::cocina::FileAccess>,
) {
    let default = dro.access.rights().file_default().into();
    for file_set in &mut dro.structural.contains {
        for file in &mut file_set.structural.contains {
            file.access = overrides.get(&file.filename).copied().unwrap_or(default);
        }
    }
}
