//! Access rights: who may view and download an object or file.

use serde::{Deserialize, Serialize};

use crate::error::{MappingError, Result};

// ============================================================================
// ENUMERATIONS
// ============================================================================

/// Visibility level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    World,
    Stanford,
    LocationBased,
    CitationOnly,
    #[default]
    Dark,
}

/// Download level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Download {
    World,
    Stanford,
    LocationBased,
    #[default]
    None,
}

/// Reading rooms for location-based access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    #[serde(rename = "spec")]
    Spec,
    #[serde(rename = "music")]
    Music,
    #[serde(rename = "ars")]
    Ars,
    #[serde(rename = "art")]
    Art,
    #[serde(rename = "hoover")]
    Hoover,
    #[serde(rename = "m&m")]
    MediaMicrotext,
}

impl Location {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "spec" => Some(Self::Spec),
            "music" => Some(Self::Music),
            "ars" => Some(Self::Ars),
            "art" => Some(Self::Art),
            "hoover" => Some(Self::Hoover),
            "m&m" => Some(Self::MediaMicrotext),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Spec => "spec",
            Self::Music => "music",
            Self::Ars => "ars",
            Self::Art => "art",
            Self::Hoover => "hoover",
            Self::MediaMicrotext => "m&m",
        }
    }
}

// ============================================================================
// RIGHTS
// ============================================================================

/// The view/download combination shared by objects, files and embargoes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rights {
    pub view: View,
    pub download: Download,
    pub location: Option<Location>,
    pub controlled_digital_lending: bool,
}

impl Rights {
    pub fn new(view: View, download: Download) -> Self {
        Self {
            view,
            download,
            location: None,
            controlled_digital_lending: false,
        }
    }

    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Access a file gets when nothing overrides it. Citation-only objects
    /// show their metadata but none of their files.
    pub fn file_default(self) -> Rights {
        match self.view {
            View::CitationOnly => Rights::new(View::Dark, Download::None),
            _ => self,
        }
    }

    /// Check that the combination is one the repository can express.
    pub fn validate(&self, path: &str) -> Result<()> {
        let allowed = match self.view {
            View::World => true,
            View::Stanford => self.download != Download::World,
            View::LocationBased => {
                matches!(self.download, Download::LocationBased | Download::None)
            }
            View::CitationOnly | View::Dark => self.download == Download::None,
        };
        if !allowed {
            return Err(MappingError::schema(
                path,
                format!(
                    "download {:?} is not allowed with view {:?}",
                    self.download, self.view
                ),
            ));
        }

        let needs_location =
            self.view == View::LocationBased || self.download == Download::LocationBased;
        match (needs_location, self.location) {
            (true, None) => {
                return Err(MappingError::schema(
                    format!("{path}/location"),
                    "location-based access requires a location",
                ));
            }
            (false, Some(_)) => {
                return Err(MappingError::schema(
                    format!("{path}/location"),
                    "location is only allowed with location-based access",
                ));
            }
            _ => {}
        }

        if self.controlled_digital_lending
            && !(self.view == View::Stanford && self.download == Download::None)
        {
            return Err(MappingError::schema(
                format!("{path}/controlledDigitalLending"),
                "controlled digital lending requires view stanford and download none",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// OBJECT ACCESS
// ============================================================================

/// Object-level access.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Access {
    #[serde(default)]
    pub view: View,
    #[serde(default)]
    pub download: Download,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub controlled_digital_lending: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embargo: Option<Embargo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_and_reproduction_statement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
}

impl Access {
    pub fn rights(&self) -> Rights {
        Rights {
            view: self.view,
            download: self.download,
            location: self.location,
            controlled_digital_lending: self.controlled_digital_lending,
        }
    }

    pub fn set_rights(&mut self, rights: Rights) {
        self.view = rights.view;
        self.download = rights.download;
        self.location = rights.location;
        self.controlled_digital_lending = rights.controlled_digital_lending;
    }

    pub fn validate(&self, path: &str) -> Result<()> {
        self.rights().validate(path)?;
        if let Some(embargo) = &self.embargo {
            embargo.validate(&format!("{path}/embargo"))?;
        }
        Ok(())
    }
}

/// Delayed release of an object to a different access level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Embargo {
    pub release_date: String,
    #[serde(default)]
    pub view: View,
    #[serde(default)]
    pub download: Download,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub controlled_digital_lending: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_and_reproduction_statement: Option<String>,
}

impl Embargo {
    pub fn rights(&self) -> Rights {
        Rights {
            view: self.view,
            download: self.download,
            location: self.location,
            controlled_digital_lending: self.controlled_digital_lending,
        }
    }

    /// Four-digit year of the release date.
    pub fn release_year(&self) -> Option<&str> {
        self.release_date
            .get(..4)
            .filter(|y| y.chars().all(|c| c.is_ascii_digit()))
    }

    pub fn validate(&self, path: &str) -> Result<()> {
        if !is_timestamp(&self.release_date) {
            return Err(MappingError::schema(
                format!("{path}/releaseDate"),
                format!("'{}' is not a date or date-time", self.release_date),
            ));
        }
        self.rights().validate(path)
    }
}

/// Access on an individual file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAccess {
    #[serde(default)]
    pub view: View,
    #[serde(default)]
    pub download: Download,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub controlled_digital_lending: bool,
}

impl FileAccess {
    pub fn rights(&self) -> Rights {
        Rights {
            view: self.view,
            download: self.download,
            location: self.location,
            controlled_digital_lending: self.controlled_digital_lending,
        }
    }
}

impl From<Rights> for FileAccess {
    fn from(rights: Rights) -> Self {
        Self {
            view: rights.view,
            download: rights.download,
            location: rights.location,
            controlled_digital_lending: rights.controlled_digital_lending,
        }
    }
}

/// RFC 3339 date-time or a plain `YYYY-MM-DD` date.
pub(crate) fn is_timestamp(value: &str) -> bool {
    chrono::DateTime::parse_from_rfc3339(value).is_ok()
        || chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}
