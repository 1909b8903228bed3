//! Canonical model → DataCite attributes.
//!
//! ```text
//! Dro ─→ DataciteProjector::project ─→ Attributes
//!          ├── contributors   creators, contributors, fundingReferences
//!          ├── dates          publicationYear, dates
//!          ├── related        relatedItems, relatedIdentifiers
//!          └── (here)         titles, types, descriptions, subjects, rightsList
//! ```
//!
//! Collections and admin policies are not registered and project to `None`.
//! Descriptive shapes the projector cannot interpret are omitted, never
//! raised.

pub mod attributes;
mod contributors;
mod dates;
mod related;

use serde_json::Value;
use tracing::debug;

use crate::base::purl_for;
use crate::cocina::{Access, Description, DescriptiveValue, Dro, RepositoryObject};
use crate::error::{MappingError, Result};
use crate::vocab::Vocabulary;

pub use attributes::{
    Affiliation, Attributes, Creator, Date, DateType, DescriptionEntry, FundingReference,
    NameIdentifier, NameType, RelatedIdentifier, RelatedItem, RelatedItemIdentifier, RightsEntry,
    Subject, Title, Types,
};

/// Publisher named on every registration.
pub const PUBLISHER: &str = "Stanford Digital Repository";

const RESOURCE_TYPES_GENERAL: &str = "DataCite resource types";
const SELF_DEPOSIT_TYPES: &str = "Stanford self-deposit resource types";
const ABSTRACT: &str = "abstract";

/// Title type → DataCite titleType.
const TITLE_TYPES: &[(&str, &str)] = &[
    ("alternative", "AlternativeTitle"),
    ("translated", "TranslatedTitle"),
    ("subtitle", "Subtitle"),
];

/// Projects repository objects onto DataCite attributes.
#[derive(Debug, Clone, Copy)]
pub struct DataciteProjector<'v> {
    vocab: &'v Vocabulary,
}

impl<'v> DataciteProjector<'v> {
    pub fn new(vocab: &'v Vocabulary) -> Self {
        Self { vocab }
    }
}

impl Default for DataciteProjector<'static> {
    fn default() -> Self {
        Self::new(Vocabulary::standard())
    }
}

impl DataciteProjector<'_> {
    /// `None` for collections and admin policies. Agreements are never
    /// registered and are rejected.
    pub fn project(&self, object: &RepositoryObject) -> Result<Option<Attributes>> {
        match object {
            RepositoryObject::Dro(dro) => Ok(Some(self.project_dro(dro))),
            RepositoryObject::Collection(_) | RepositoryObject::AdminPolicy(_) => Ok(None),
            RepositoryObject::Agreement(dro) => {
                Err(MappingError::UnsupportedObjectType(dro.kind.uri()))
            }
        }
    }

    /// The attribute document as JSON, ready for the registrar.
    pub fn project_value(&self, object: &RepositoryObject) -> Result<Option<Value>> {
        self.project(object)?
            .map(|attributes| serde_json::to_value(attributes).map_err(MappingError::from))
            .transpose()
    }

    pub fn project_dro(&self, dro: &Dro) -> Attributes {
        debug!(object_id = %dro.external_identifier, "projecting DataCite attributes");
        let description = &dro.description;
        let embargo = dro.access.embargo.as_ref();
        let agents = contributors::project(self.vocab, &description.contributor);
        let (related_items, related_identifiers) = related::project(&description.related_resource);

        Attributes {
            doi: dro.identification.doi.clone(),
            url: Some(
                description
                    .purl
                    .clone()
                    .unwrap_or_else(|| purl_for(&dro.external_identifier)),
            ),
            creators: agents.creators,
            contributors: agents.contributors,
            titles: titles(description),
            publisher: PUBLISHER.to_string(),
            publication_year: dates::publication_year(description, embargo),
            types: types(description),
            dates: dates::dates(description, embargo),
            descriptions: descriptions(description),
            subjects: subjects(description),
            rights_list: self.rights_list(&dro.access),
            funding_references: agents.funding_references,
            related_items,
            related_identifiers,
        }
    }

    fn rights_list(&self, access: &Access) -> Vec<RightsEntry> {
        access
            .license
            .iter()
            .map(|uri| RightsEntry {
                rights: self.vocab.license_name(uri).map(str::to_string),
                rights_uri: uri.clone(),
            })
            .collect()
    }
}

fn titles(description: &Description) -> Vec<Title> {
    description
        .title
        .iter()
        .filter_map(|title| {
            let text = title.display_text()?;
            let title_type = title
                .kind
                .as_deref()
                .and_then(|kind| TITLE_TYPES.iter().find(|(k, _)| *k == kind))
                .map(|(_, datacite)| datacite.to_string());
            Some(Title {
                title: text,
                title_type,
            })
        })
        .collect()
}

/// resourceTypeGeneral from the DataCite form; resourceType from the
/// self-deposit genre's subtypes, else its type.
fn types(description: &Description) -> Option<Types> {
    let general = description
        .form
        .iter()
        .find(|form| form.source_value() == Some(RESOURCE_TYPES_GENERAL))
        .and_then(|form| form.value.clone())?;
    let resource_type = description
        .form
        .iter()
        .find(|form| form.source_value() == Some(SELF_DEPOSIT_TYPES))
        .and_then(|form| {
            let subtypes: Vec<&str> = form
                .structured_value
                .iter()
                .filter(|part| part.kind_is("subtype"))
                .filter_map(|part| part.value.as_deref())
                .collect();
            if subtypes.is_empty() {
                form.part_value("type").map(str::to_string)
            } else {
                Some(subtypes.join("; "))
            }
        });
    Some(Types {
        resource_type_general: general,
        resource_type,
    })
}

fn descriptions(description: &Description) -> Vec<DescriptionEntry> {
    description
        .note
        .iter()
        .filter(|note| note.kind_is(ABSTRACT))
        .filter_map(DescriptiveValue::display_text)
        .map(|text| DescriptionEntry {
            description: text,
            description_type: "Abstract".to_string(),
        })
        .collect()
}

fn subjects(description: &Description) -> Vec<Subject> {
    description
        .subject
        .iter()
        .filter_map(|subject| {
            Some(Subject {
                subject: subject.display_text()?,
                subject_scheme: subject.source_code().map(str::to_string),
                scheme_uri: subject.source.as_ref().and_then(|s| s.uri.clone()),
                value_uri: subject.uri.clone(),
            })
        })
        .collect()
}
