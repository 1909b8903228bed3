//! Source ids, catalog links and barcodes.

use serde::{Deserialize, Serialize};

use crate::error::{MappingError, Result};

/// Catalog systems an object may link to. `Previous*` entries are historical
/// and never stand in for the current catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Catalog {
    #[serde(rename = "symphony")]
    Symphony,
    #[serde(rename = "previous symphony")]
    PreviousSymphony,
    #[serde(rename = "folio")]
    Folio,
    #[serde(rename = "previous folio")]
    PreviousFolio,
}

impl Catalog {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "symphony" => Some(Self::Symphony),
            "previous symphony" => Some(Self::PreviousSymphony),
            "folio" => Some(Self::Folio),
            "previous folio" => Some(Self::PreviousFolio),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Symphony => "symphony",
            Self::PreviousSymphony => "previous symphony",
            Self::Folio => "folio",
            Self::PreviousFolio => "previous folio",
        }
    }

    pub fn is_previous(self) -> bool {
        matches!(self, Self::PreviousSymphony | Self::PreviousFolio)
    }
}

/// A link to a catalog record; round-trips keyed by `(catalog, record_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogLink {
    pub catalog: Catalog,
    pub refresh: bool,
    pub record_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identification {
    /// `namespace:value`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    #[serde(default)]
    pub catalog_links: Vec<CatalogLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
}

impl Identification {
    pub fn validate(&self, path: &str, source_id_required: bool) -> Result<()> {
        match &self.source_id {
            Some(id) => {
                let valid = id
                    .split_once(':')
                    .is_some_and(|(ns, value)| !ns.trim().is_empty() && !value.trim().is_empty());
                if !valid {
                    return Err(MappingError::schema(
                        format!("{path}/sourceId"),
                        format!("'{id}' is not a namespace:value pair"),
                    ));
                }
            }
            None if source_id_required => {
                return Err(MappingError::schema(
                    format!("{path}/sourceId"),
                    "source id is required",
                ));
            }
            None => {}
        }

        for (i, link) in self.catalog_links.iter().enumerate() {
            if link.record_id.trim().is_empty() {
                return Err(MappingError::schema(
                    format!("{path}/catalogLinks/{i}/recordId"),
                    "record id must not be empty",
                ));
            }
            if link.refresh && link.catalog.is_previous() {
                return Err(MappingError::schema(
                    format!("{path}/catalogLinks/{i}/refresh"),
                    "previous catalog links cannot be refreshed",
                ));
            }
        }
        Ok(())
    }
}
