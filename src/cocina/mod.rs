//! The canonical ("Cocina") repository object model.
//!
//! ```text
//! RepositoryObject
//! ├── Dro / Agreement  access, administrative, description, identification, structural
//! ├── Collection       access, administrative, description, identification
//! └── AdminPolicy      administrative (with access template), optional description
//! ```
//!
//! Objects are transient values: produced by the legacy mappers or from JSON,
//! consumed by the legacy writer or the DataCite projector. Construction from
//! a plain attribute map goes through [`RepositoryObject::from_value`], which
//! validates before returning.

pub mod access;
pub mod administrative;
pub mod description;
pub mod fragment;
pub mod identification;
pub mod structural;
pub mod validate;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::base::is_valid_druid;
use crate::error::{MappingError, Result};

pub use access::{Access, Download, Embargo, FileAccess, Location, Rights, View};
pub use administrative::{AdminPolicyAdministrative, Administrative, ReleaseTag};
pub use description::{
    AdminMetadata, Contributor, ContributorType, Description, DescriptiveAccessMetadata,
    DescriptiveValue, Event, InvalidDate, Language, RelatedResource, Source,
};
pub use fragment::{
    ContentFragment, Fragment, IdentityFragment, ObjectCategory, Relationships, RightsFragment,
};
pub use identification::{Catalog, CatalogLink, Identification};
pub use structural::{
    DigestType, File, FileAdministrative, FileSet, FileSetStructural, MemberOrder,
    MessageDigest, Presentation, ResourceType, Structural, ViewingDirection,
};

/// Schema version written on every object.
pub const COCINA_VERSION: &str = "0.86.0";

/// Prefix shared by object type URIs.
pub const OBJECT_TYPE_PREFIX: &str = "https://cocina.sul.stanford.edu/models/";

fn cocina_version() -> String {
    COCINA_VERSION.to_string()
}

// ============================================================================
// OBJECT TYPES
// ============================================================================

macro_rules! object_types {
    ($($variant:ident => $code:literal),* $(,)?) => {
        /// Object type tag; serialized as its URI.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(into = "String", try_from = "String")]
        pub enum ObjectType {
            $($variant,)*
        }

        impl ObjectType {
            /// From the short name (the last URI path segment).
            pub fn from_code(code: &str) -> Option<Self> {
                match code {
                    $($code => Some(Self::$variant),)*
                    _ => None,
                }
            }

            pub fn code(self) -> &'static str {
                match self {
                    $(Self::$variant => $code,)*
                }
            }
        }
    };
}

object_types! {
    Object => "object",
    Book => "book",
    Document => "document",
    Geo => "geo",
    Image => "image",
    Map => "map",
    Media => "media",
    Manuscript => "manuscript",
    ThreeD => "3d",
    WebarchiveBinary => "webarchive-binary",
    WebarchiveSeed => "webarchive-seed",
    Collection => "collection",
    AdminPolicy => "admin_policy",
    Agreement => "agreement",
}

impl ObjectType {
    pub fn uri(self) -> String {
        format!("{OBJECT_TYPE_PREFIX}{}", self.code())
    }

    /// Item types, i.e. everything a DRO may carry.
    pub fn is_dro(self) -> bool {
        !matches!(self, Self::Collection | Self::AdminPolicy | Self::Agreement)
    }
}

impl From<ObjectType> for String {
    fn from(kind: ObjectType) -> Self {
        kind.uri()
    }
}

impl TryFrom<String> for ObjectType {
    type Error = String;

    fn try_from(uri: String) -> std::result::Result<Self, Self::Error> {
        uri.strip_prefix(OBJECT_TYPE_PREFIX)
            .and_then(ObjectType::from_code)
            .ok_or_else(|| format!("unknown object type '{uri}'"))
    }
}

// ============================================================================
// OBJECTS
// ============================================================================

/// A digital repository object (item), also used for agreements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dro {
    #[serde(default = "cocina_version")]
    pub cocina_version: String,
    #[serde(rename = "type")]
    pub kind: ObjectType,
    pub external_identifier: String,
    pub label: String,
    pub version: u32,
    pub access: Access,
    pub administrative: Administrative,
    pub description: Description,
    pub identification: Identification,
    #[serde(default)]
    pub structural: Structural,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    #[serde(default = "cocina_version")]
    pub cocina_version: String,
    #[serde(rename = "type")]
    pub kind: ObjectType,
    pub external_identifier: String,
    pub label: String,
    pub version: u32,
    pub access: Access,
    pub administrative: Administrative,
    pub description: Description,
    #[serde(default)]
    pub identification: Identification,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AdminPolicy {
    #[serde(default = "cocina_version")]
    pub cocina_version: String,
    #[serde(rename = "type")]
    pub kind: ObjectType,
    pub external_identifier: String,
    pub label: String,
    pub version: u32,
    pub administrative: AdminPolicyAdministrative,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,
}

/// Any repository object, tagged by its `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RepositoryObject {
    Dro(Dro),
    Collection(Collection),
    AdminPolicy(AdminPolicy),
    Agreement(Dro),
}

impl RepositoryObject {
    /// Build and validate an object from a plain attribute map.
    pub fn from_value(value: Value) -> Result<Self> {
        let object = Self::from_value_unchecked(value)?;
        object.validate()?;
        Ok(object)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    fn from_value_unchecked(value: Value) -> Result<Self> {
        let type_uri = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| MappingError::schema("/type", "type is required"))?;
        let kind = ObjectType::try_from(type_uri.to_string())
            .map_err(|message| MappingError::schema("/type", message))?;

        let schema = |e: serde_json::Error| MappingError::schema("/", e.to_string());
        Ok(match kind {
            ObjectType::Collection => Self::Collection(serde_json::from_value(value).map_err(schema)?),
            ObjectType::AdminPolicy => {
                Self::AdminPolicy(serde_json::from_value(value).map_err(schema)?)
            }
            ObjectType::Agreement => Self::Agreement(serde_json::from_value(value).map_err(schema)?),
            _ => Self::Dro(serde_json::from_value(value).map_err(schema)?),
        })
    }

    pub fn object_type(&self) -> ObjectType {
        match self {
            Self::Dro(dro) | Self::Agreement(dro) => dro.kind,
            Self::Collection(collection) => collection.kind,
            Self::AdminPolicy(policy) => policy.kind,
        }
    }

    pub fn external_identifier(&self) -> &str {
        match self {
            Self::Dro(dro) | Self::Agreement(dro) => &dro.external_identifier,
            Self::Collection(collection) => &collection.external_identifier,
            Self::AdminPolicy(policy) => &policy.external_identifier,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Dro(dro) | Self::Agreement(dro) => &dro.label,
            Self::Collection(collection) => &collection.label,
            Self::AdminPolicy(policy) => &policy.label,
        }
    }

    pub fn description(&self) -> Option<&Description> {
        match self {
            Self::Dro(dro) | Self::Agreement(dro) => Some(&dro.description),
            Self::Collection(collection) => Some(&collection.description),
            Self::AdminPolicy(policy) => policy.description.as_ref(),
        }
    }

    pub fn access(&self) -> Option<&Access> {
        match self {
            Self::Dro(dro) | Self::Agreement(dro) => Some(&dro.access),
            Self::Collection(collection) => Some(&collection.access),
            Self::AdminPolicy(_) => None,
        }
    }

    /// Check type-specific shape rules on top of what deserialization enforced.
    pub fn validate(&self) -> Result<()> {
        if !is_valid_druid(self.external_identifier()) {
            return Err(MappingError::schema(
                "/externalIdentifier",
                format!("'{}' is not a repository identifier", self.external_identifier()),
            ));
        }

        match self {
            Self::Dro(dro) => {
                if !dro.kind.is_dro() {
                    return Err(MappingError::schema(
                        "/type",
                        format!("{} is not an item type", dro.kind.uri()),
                    ));
                }
                validate_dro(dro)
            }
            Self::Agreement(dro) => {
                if dro.kind != ObjectType::Agreement {
                    return Err(MappingError::schema("/type", "expected an agreement"));
                }
                if !dro.structural.contains.is_empty() {
                    return Err(MappingError::schema(
                        "/structural/contains",
                        "agreements do not contain file sets",
                    ));
                }
                validate_dro(dro)
            }
            Self::Collection(collection) => {
                check_version(collection.version)?;
                if !matches!(collection.access.view, View::World | View::Dark) {
                    return Err(MappingError::schema(
                        "/access/view",
                        "collections are either world or dark",
                    ));
                }
                collection.access.validate("/access")?;
                collection.administrative.validate("/administrative")?;
                collection.identification.validate("/identification", false)?;
                validate::validate_description(&collection.description, "/description", true)
            }
            Self::AdminPolicy(policy) => {
                check_version(policy.version)?;
                policy.administrative.validate("/administrative")?;
                match &policy.description {
                    Some(description) => {
                        validate::validate_description(description, "/description", false)
                    }
                    None => Ok(()),
                }
            }
        }
    }
}

impl<'de> Deserialize<'de> for RepositoryObject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value_unchecked(value).map_err(serde::de::Error::custom)
    }
}

fn check_version(version: u32) -> Result<()> {
    if version == 0 {
        return Err(MappingError::schema("/version", "version starts at 1"));
    }
    Ok(())
}

fn validate_dro(dro: &Dro) -> Result<()> {
    check_version(dro.version)?;
    dro.access.validate("/access")?;
    dro.administrative.validate("/administrative")?;
    dro.identification.validate("/identification", true)?;
    dro.structural.validate("/structural")?;
    validate::validate_description(&dro.description, "/description", true)
}
