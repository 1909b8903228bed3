//! Structural data: collection membership, member ordering, file sets and files.

use serde::{Deserialize, Serialize};

use super::access::FileAccess;
use crate::error::{MappingError, Result};

/// Type URI carried by every file.
pub const FILE_TYPE: &str = "https://cocina.sul.stanford.edu/models/file";

fn file_type() -> String {
    FILE_TYPE.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Structural {
    #[serde(default)]
    pub contains: Vec<FileSet>,
    #[serde(default)]
    pub has_member_orders: Vec<MemberOrder>,
    #[serde(default)]
    pub is_member_of: Vec<String>,
}

/// Ordering hint for members of a compound object.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberOrder {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewing_direction: Option<ViewingDirection>,
    #[serde(default)]
    pub members: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewingDirection {
    LeftToRight,
    RightToLeft,
}

impl ViewingDirection {
    /// From a legacy `bookData@readingOrder` value.
    pub fn from_reading_order(order: &str) -> Option<Self> {
        match order {
            "ltr" => Some(Self::LeftToRight),
            "rtl" => Some(Self::RightToLeft),
            _ => None,
        }
    }

    pub fn reading_order(self) -> &'static str {
        match self {
            Self::LeftToRight => "ltr",
            Self::RightToLeft => "rtl",
        }
    }
}

// ============================================================================
// FILE SETS
// ============================================================================

macro_rules! resource_types {
    ($($variant:ident => $code:literal),* $(,)?) => {
        /// Kind of a file set; serialized as its type URI.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(into = "String", try_from = "String")]
        pub enum ResourceType {
            $($variant,)*
        }

        impl ResourceType {
            /// From a legacy `resource@type` value.
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

/// Prefix shared by file set type URIs.
pub const RESOURCE_TYPE_PREFIX: &str = "https://cocina.sul.stanford.edu/models/resources/";

impl From<ResourceType> for String {
    fn from(kind: ResourceType) -> Self {
        format!("{RESOURCE_TYPE_PREFIX}{}", kind.code())
    }
}

impl TryFrom<String> for ResourceType {
    type Error = String;

    fn try_from(uri: String) -> std::result::Result<Self, Self::Error> {
        uri.strip_prefix(RESOURCE_TYPE_PREFIX)
            .and_then(ResourceType::from_code)
            .ok_or_else(|| format!("unknown file set type '{uri}'"))
    }
}

resource_types! {
    File => "file",
    Image => "image",
    Page => "page",
    Audio => "audio",
    Video => "video",
    ThreeD => "3d",
    Document => "document",
    Object => "object",
    MainAugmented => "main-augmented",
    Supplement => "supplement",
    Attachment => "attachment",
    Permissions => "permissions",
    Preview => "preview",
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSet {
    #[serde(rename = "type")]
    pub kind: ResourceType,
    pub external_identifier: String,
    #[serde(default)]
    pub label: String,
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub structural: FileSetStructural,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSetStructural {
    #[serde(default)]
    pub contains: Vec<File>,
}

// ============================================================================
// FILES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct File {
    #[serde(rename = "type", default = "file_type")]
    pub kind: String,
    pub external_identifier: String,
    #[serde(default)]
    pub label: String,
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_mime_type: Option<String>,
    #[serde(rename = "use", default, skip_serializing_if = "Option::is_none")]
    pub use_: Option<String>,
    #[serde(default)]
    pub has_message_digests: Vec<MessageDigest>,
    #[serde(default)]
    pub access: FileAccess,
    #[serde(default)]
    pub administrative: FileAdministrative,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presentation: Option<Presentation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDigest {
    #[serde(rename = "type")]
    pub kind: DigestType,
    pub digest: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestType {
    Sha1,
    Md5,
}

impl DigestType {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "sha1" => Some(Self::Sha1),
            "md5" => Some(Self::Md5),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Sha1 => "sha1",
            Self::Md5 => "md5",
        }
    }
}

/// Shelving, publishing and preservation flags for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAdministrative {
    #[serde(default)]
    pub publish: bool,
    #[serde(default)]
    pub sdr_preserve: bool,
    #[serde(default)]
    pub shelve: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Presentation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

fn default_version() -> u32 {
    1
}

impl Structural {
    pub fn validate(&self, path: &str) -> Result<()> {
        for (i, member) in self.is_member_of.iter().enumerate() {
            super::administrative::validate_link(member, &format!("{path}/isMemberOf/{i}"))?;
        }
        for (i, file_set) in self.contains.iter().enumerate() {
            let set_path = format!("{path}/contains/{i}");
            if file_set.external_identifier.trim().is_empty() {
                return Err(MappingError::schema(
                    format!("{set_path}/externalIdentifier"),
                    "file set identifier must not be empty",
                ));
            }
            for (j, file) in file_set.structural.contains.iter().enumerate() {
                file.validate(&format!("{set_path}/structural/contains/{j}"))?;
            }
        }
        Ok(())
    }
}

impl File {
    pub fn validate(&self, path: &str) -> Result<()> {
        if self.kind != FILE_TYPE {
            return Err(MappingError::schema(
                format!("{path}/type"),
                format!("'{}' is not {FILE_TYPE}", self.kind),
            ));
        }
        if self.filename.trim().is_empty() {
            return Err(MappingError::schema(
                format!("{path}/filename"),
                "filename must not be empty",
            ));
        }
        let mut seen = Vec::new();
        for (i, digest) in self.has_message_digests.iter().enumerate() {
            if seen.contains(&digest.kind) {
                return Err(MappingError::schema(
                    format!("{path}/hasMessageDigests/{i}"),
                    format!("duplicate {} digest", digest.kind.code()),
                ));
            }
            seen.push(digest.kind);
        }
        self.access.rights().validate(&format!("{path}/access"))
    }

    pub fn digest(&self, kind: DigestType) -> Option<&str> {
        self.has_message_digests
            .iter()
            .find(|d| d.kind == kind)
            .map(|d| d.digest.as_str())
    }
}
