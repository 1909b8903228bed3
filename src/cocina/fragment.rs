//! Per-datastream pieces of a repository object.
//!
//! Each legacy datastream maps to exactly one fragment, so a single datastream
//! can be read, written back, and compared without the rest of the object.

use indexmap::IndexMap;

use super::access::{Access, Embargo, FileAccess};
use super::administrative::ReleaseTag;
use super::description::Description;
use super::identification::Identification;
use super::structural::{FileSet, MemberOrder};
use super::{ObjectType, RepositoryObject};

/// The coarse object category recorded in identity metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectCategory {
    Item,
    Collection,
    AdminPolicy,
    Agreement,
}

impl ObjectCategory {
    /// From an `objectType` value.
    pub fn from_legacy(value: &str) -> Option<Self> {
        match value {
            "item" => Some(Self::Item),
            "collection" => Some(Self::Collection),
            "adminPolicy" => Some(Self::AdminPolicy),
            "agreement" => Some(Self::Agreement),
            _ => None,
        }
    }

    pub fn legacy(self) -> &'static str {
        match self {
            Self::Item => "item",
            Self::Collection => "collection",
            Self::AdminPolicy => "adminPolicy",
            Self::Agreement => "agreement",
        }
    }

    pub fn of(object_type: ObjectType) -> Self {
        match object_type {
            ObjectType::Collection => Self::Collection,
            ObjectType::AdminPolicy => Self::AdminPolicy,
            ObjectType::Agreement => Self::Agreement,
            _ => Self::Item,
        }
    }
}

/// Identity metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityFragment {
    pub external_identifier: String,
    pub category: ObjectCategory,
    pub label: String,
    pub identification: Identification,
    pub release_tags: Vec<ReleaseTag>,
}

/// Rights metadata: object-level access plus per-file overrides keyed by filename.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RightsFragment {
    pub access: Access,
    pub file_access: IndexMap<String, FileAccess>,
}

/// Content metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentFragment {
    pub object_type: ObjectType,
    pub contains: Vec<FileSet>,
    pub has_member_orders: Vec<MemberOrder>,
}

/// Object-to-object links.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Relationships {
    pub has_admin_policy: Option<String>,
    pub is_member_of: Vec<String>,
    pub has_agreement: Option<String>,
}

/// What a caller submits to the legacy writer. Only the datastreams a
/// fragment represents are touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Identity(IdentityFragment),
    Rights(RightsFragment),
    /// `None` writes an empty embargo datastream.
    Embargo(Option<Embargo>),
    Content(ContentFragment),
    Descriptive(Box<Description>),
    Relationships(Relationships),
    Object(Box<RepositoryObject>),
}
