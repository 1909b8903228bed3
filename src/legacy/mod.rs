//! The legacy object container and the term tables shared by both mapping
//! directions.

pub mod mods;

use crate::base::{XmlElement, prefixed_druid};
use crate::error::{MappingError, Result};

/// A named legacy XML datastream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Datastream {
    Identity,
    Rights,
    Embargo,
    Content,
    Descriptive,
    Relationships,
}

impl Datastream {
    pub const ALL: [Datastream; 6] = [
        Self::Identity,
        Self::Rights,
        Self::Embargo,
        Self::Content,
        Self::Descriptive,
        Self::Relationships,
    ];

    /// Datastream id in the legacy store.
    pub fn name(self) -> &'static str {
        match self {
            Self::Identity => "identityMetadata",
            Self::Rights => "rightsMetadata",
            Self::Embargo => "embargoMetadata",
            Self::Content => "contentMetadata",
            Self::Descriptive => "descMetadata",
            Self::Relationships => "RELS-EXT",
        }
    }

    /// Local name of the document's root element.
    pub fn root(self) -> &'static str {
        match self {
            Self::Identity => "identityMetadata",
            Self::Rights => "rightsMetadata",
            Self::Embargo => "embargoMetadata",
            Self::Content => "contentMetadata",
            Self::Descriptive => "mods",
            Self::Relationships => "RDF",
        }
    }

    /// Identify a document by its root element's local name.
    pub fn from_root(local_name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ds| ds.root() == local_name)
    }
}

/// One object's legacy datastreams. Absent datastreams are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LegacyObject {
    /// Prefixed object identifier (`druid:...`).
    pub pid: String,
    pub version: u32,
    pub identity: Option<XmlElement>,
    pub rights: Option<XmlElement>,
    pub embargo: Option<XmlElement>,
    pub content: Option<XmlElement>,
    pub descriptive: Option<XmlElement>,
    pub relationships: Option<XmlElement>,
}

impl LegacyObject {
    pub fn new(pid: &str) -> Self {
        Self {
            pid: prefixed_druid(pid),
            version: 1,
            ..Default::default()
        }
    }

    /// Parse and attach a datastream, identified by its root element.
    pub fn with_xml(mut self, xml: &str) -> Result<Self> {
        let root = XmlElement::parse(xml)?;
        let datastream = Datastream::from_root(root.local_name()).ok_or_else(|| {
            MappingError::unmappable(
                "document",
                format!("unrecognized root element <{}>", root.name),
            )
        })?;
        self.set(datastream, root);
        Ok(self)
    }

    pub fn get(&self, datastream: Datastream) -> Option<&XmlElement> {
        self.slot(datastream).as_ref()
    }

    pub fn set(&mut self, datastream: Datastream, document: XmlElement) {
        *self.slot_mut(datastream) = Some(document);
    }

    pub fn take(&mut self, datastream: Datastream) -> Option<XmlElement> {
        self.slot_mut(datastream).take()
    }

    fn slot(&self, datastream: Datastream) -> &Option<XmlElement> {
        match datastream {
            Datastream::Identity => &self.identity,
            Datastream::Rights => &self.rights,
            Datastream::Embargo => &self.embargo,
            Datastream::Content => &self.content,
            Datastream::Descriptive => &self.descriptive,
            Datastream::Relationships => &self.relationships,
        }
    }

    fn slot_mut(&mut self, datastream: Datastream) -> &mut Option<XmlElement> {
        match datastream {
            Datastream::Identity => &mut self.identity,
            Datastream::Rights => &mut self.rights,
            Datastream::Embargo => &mut self.embargo,
            Datastream::Content => &mut self.content,
            Datastream::Descriptive => &mut self.descriptive,
            Datastream::Relationships => &mut self.relationships,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_xml_routes_by_root() {
        let object = LegacyObject::new("bc123df4567")
            .with_xml("<mods:mods xmlns:mods=\"http://www.loc.gov/mods/v3\"/>")
            .unwrap()
            .with_xml("<identityMetadata><objectType>item</objectType></identityMetadata>")
            .unwrap();
        assert_eq!(object.pid, "druid:bc123df4567");
        assert!(object.get(Datastream::Descriptive).is_some());
        assert!(object.get(Datastream::Identity).is_some());
        assert!(object.get(Datastream::Content).is_none());
    }

    #[test]
    fn test_unknown_root_is_unmappable() {
        let err = LegacyObject::new("bc123df4567")
            .with_xml("<workflows/>")
            .unwrap_err();
        assert!(matches!(err, MappingError::UnmappableDocument { .. }));
    }
}
