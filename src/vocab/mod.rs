//! Read-only lookup tables injected into the mappers.
//!
//! The standard tables ship embedded as YAML and are parsed once. Callers
//! that need different tables (tests, other institutions) build their own
//! [`Vocabulary`] with [`Vocabulary::from_yaml`] and hand it to the mappers.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::error::{MappingError, Result};

const STANDARD_YAML: &str = include_str!("standard.yaml");

/// Parsed from a compile-time constant, so the only failure is a broken
/// `standard.yaml`, which `test_embedded_vocabulary_parses` rejects.
static STANDARD: Lazy<Vocabulary> = Lazy::new(|| {
    Vocabulary::from_yaml(STANDARD_YAML).expect("embedded vocabulary is valid YAML")
});

#[derive(Debug, Deserialize)]
struct RawVocabulary {
    identifier_types: Vec<IdentifierTypeRow>,
    roles: Vec<RoleRow>,
    datacite_contributor_types: Vec<ContributorTypeRow>,
    catalogs: Vec<CatalogRow>,
    barcode_other_id: String,
    licenses: Vec<LicenseRow>,
    legacy_licenses: Vec<LegacyLicenseRow>,
    content_types: Vec<ContentTypeRow>,
}

#[derive(Debug, Deserialize)]
struct IdentifierTypeRow {
    mods: String,
    cocina: String,
}

#[derive(Debug, Deserialize)]
struct RoleRow {
    code: String,
    term: String,
}

#[derive(Debug, Deserialize)]
struct ContributorTypeRow {
    role: String,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    other_id: String,
    catalog: String,
}

#[derive(Debug, Deserialize)]
struct LicenseRow {
    uri: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct LegacyLicenseRow {
    scheme: String,
    code: String,
    uri: String,
}

#[derive(Debug, Deserialize)]
struct ContentTypeRow {
    content: String,
    object: String,
}

/// Indexed lookup tables. Keys used for case-insensitive lookups are stored lowercased.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    mods_identifier_types: FxHashMap<String, String>,
    cocina_identifier_types: FxHashMap<String, String>,
    role_terms: FxHashMap<String, String>,
    role_codes: FxHashMap<String, String>,
    contributor_types: FxHashMap<String, String>,
    catalogs_by_other_id: FxHashMap<String, String>,
    other_ids_by_catalog: FxHashMap<String, String>,
    barcode_other_id: String,
    license_names: FxHashMap<String, String>,
    legacy_licenses: FxHashMap<(String, String), String>,
    object_types_by_content: FxHashMap<String, String>,
    content_types_by_object: FxHashMap<String, String>,
}

impl Vocabulary {
    /// The embedded standard tables.
    pub fn standard() -> &'static Vocabulary {
        &STANDARD
    }

    /// Build tables from a YAML document with the same shape as the embedded one.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let raw: RawVocabulary =
            serde_yaml::from_str(yaml).map_err(|e| MappingError::Vocabulary(e.to_string()))?;

        let mut vocab = Vocabulary {
            barcode_other_id: raw.barcode_other_id,
            ..Default::default()
        };
        for row in raw.identifier_types {
            vocab
                .mods_identifier_types
                .insert(row.mods.to_lowercase(), row.mods.clone());
            vocab
                .cocina_identifier_types
                .insert(row.mods.to_lowercase(), row.cocina.clone());
            vocab
                .mods_identifier_types
                .entry(row.cocina.to_lowercase())
                .or_insert(row.mods);
        }
        for row in raw.roles {
            vocab.role_terms.insert(row.code.clone(), row.term.clone());
            vocab.role_codes.insert(row.term, row.code);
        }
        for row in raw.datacite_contributor_types {
            vocab.contributor_types.insert(row.role, row.kind);
        }
        for row in raw.catalogs {
            vocab
                .catalogs_by_other_id
                .insert(row.other_id.clone(), row.catalog.clone());
            vocab.other_ids_by_catalog.insert(row.catalog, row.other_id);
        }
        for row in raw.licenses {
            vocab.license_names.insert(row.uri, row.name);
        }
        for row in raw.legacy_licenses {
            vocab
                .legacy_licenses
                .insert((row.scheme, row.code.to_lowercase()), row.uri);
        }
        for row in raw.content_types {
            vocab
                .object_types_by_content
                .insert(row.content.clone(), row.object.clone());
            vocab
                .content_types_by_object
                .entry(row.object)
                .or_insert(row.content);
        }
        Ok(vocab)
    }

    // ------------------------------------------------------------------
    // Identifier types
    // ------------------------------------------------------------------

    /// Canonical MODS spelling for an identifier type, matched case-insensitively.
    pub fn canonical_mods_identifier_type(&self, mods_type: &str) -> Option<&str> {
        self.mods_identifier_types
            .get(&mods_type.to_lowercase())
            .map(String::as_str)
    }

    /// Cocina identifier type for a MODS identifier type.
    pub fn cocina_identifier_type(&self, mods_type: &str) -> Option<&str> {
        self.cocina_identifier_types
            .get(&mods_type.to_lowercase())
            .map(String::as_str)
    }

    /// MODS identifier type for a Cocina identifier type.
    pub fn mods_identifier_type(&self, cocina_type: &str) -> Option<&str> {
        self.canonical_mods_identifier_type(cocina_type)
    }

    // ------------------------------------------------------------------
    // Roles
    // ------------------------------------------------------------------

    /// MARC relator term for a code.
    pub fn role_term(&self, code: &str) -> Option<&str> {
        self.role_terms.get(code).map(String::as_str)
    }

    /// MARC relator code for a term.
    pub fn role_code(&self, term: &str) -> Option<&str> {
        self.role_codes.get(&term.to_lowercase()).map(String::as_str)
    }

    /// DataCite contributorType for a role term.
    pub fn datacite_contributor_type(&self, role_term: &str) -> Option<&str> {
        self.contributor_types
            .get(&role_term.to_lowercase())
            .map(String::as_str)
    }

    // ------------------------------------------------------------------
    // Identity other ids
    // ------------------------------------------------------------------

    /// Catalog name for an `otherId@name`.
    pub fn catalog_for_other_id(&self, name: &str) -> Option<&str> {
        self.catalogs_by_other_id.get(name).map(String::as_str)
    }

    /// `otherId@name` for a catalog name.
    pub fn other_id_for_catalog(&self, catalog: &str) -> Option<&str> {
        self.other_ids_by_catalog.get(catalog).map(String::as_str)
    }

    pub fn barcode_other_id(&self) -> &str {
        &self.barcode_other_id
    }

    /// Whether an `otherId@name` survives normalization.
    pub fn is_allowed_other_id(&self, name: &str) -> bool {
        name == self.barcode_other_id || self.catalogs_by_other_id.contains_key(name)
    }

    // ------------------------------------------------------------------
    // Licenses
    // ------------------------------------------------------------------

    pub fn license_name(&self, uri: &str) -> Option<&str> {
        self.license_names.get(uri).map(String::as_str)
    }

    /// License URI for a legacy `use/machine@type` code.
    pub fn legacy_license_uri(&self, scheme: &str, code: &str) -> Option<&str> {
        self.legacy_licenses
            .get(&(scheme.to_string(), code.trim().to_lowercase()))
            .map(String::as_str)
    }

    // ------------------------------------------------------------------
    // Object types
    // ------------------------------------------------------------------

    /// Short object type name for a `contentMetadata@type`.
    pub fn object_type_for_content(&self, content_type: &str) -> Option<&str> {
        self.object_types_by_content
            .get(content_type)
            .map(String::as_str)
    }

    /// `contentMetadata@type` for a short object type name.
    pub fn content_type_for_object(&self, object_type: &str) -> Option<&str> {
        self.content_types_by_object
            .get(object_type)
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_vocabulary_parses() {
        let vocab = Vocabulary::from_yaml(STANDARD_YAML).unwrap();
        assert!(!vocab.role_terms.is_empty());
        assert!(!vocab.mods_identifier_types.is_empty());
        assert!(!vocab.barcode_other_id.is_empty());
    }

    #[test]
    fn test_standard_vocabulary_loads() {
        let vocab = Vocabulary::standard();
        assert_eq!(vocab.role_term("aut"), Some("author"));
        assert_eq!(vocab.role_code("Author"), Some("aut"));
        assert_eq!(vocab.barcode_other_id(), "barcode");
    }

    #[test]
    fn test_identifier_types_both_directions() {
        let vocab = Vocabulary::standard();
        assert_eq!(vocab.canonical_mods_identifier_type("Isbn"), Some("isbn"));
        assert_eq!(vocab.canonical_mods_identifier_type("Oclc"), Some("OCLC"));
        assert_eq!(vocab.canonical_mods_identifier_type("Xyz"), None);
        assert_eq!(vocab.cocina_identifier_type("isbn"), Some("ISBN"));
        assert_eq!(vocab.mods_identifier_type("ISBN"), Some("isbn"));
        assert_eq!(vocab.mods_identifier_type("Handle"), Some("hdl"));
    }

    #[test]
    fn test_other_id_allow_list() {
        let vocab = Vocabulary::standard();
        assert!(vocab.is_allowed_other_id("catkey"));
        assert!(vocab.is_allowed_other_id("barcode"));
        assert!(!vocab.is_allowed_other_id("uuid"));
        assert_eq!(vocab.catalog_for_other_id("previous_catkey"), Some("previous symphony"));
        assert_eq!(vocab.other_id_for_catalog("folio"), Some("folio_instance_hrid"));
    }

    #[test]
    fn test_content_type_round_trip() {
        let vocab = Vocabulary::standard();
        assert_eq!(vocab.object_type_for_content("file"), Some("object"));
        assert_eq!(vocab.content_type_for_object("object"), Some("file"));
        assert_eq!(vocab.content_type_for_object("3d"), Some("3d"));
    }

    #[test]
    fn test_custom_vocabulary_rejects_bad_yaml() {
        assert!(Vocabulary::from_yaml("roles: [").is_err());
    }
}
