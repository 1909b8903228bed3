//! # cocina-mapping
//!
//! Bidirectional mapping between legacy repository XML datastreams and the
//! Cocina object model, with normalization, round-trip verification and a
//! DataCite projection.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! datacite     → Cocina object → DataCite attributes
//!   ↓
//! roundtrip    → normalize ∘ write ∘ read ∘ normalize, equivalence check
//!   ↓
//! to_legacy    → fragments → legacy XML datastreams
//! from_legacy  → legacy XML datastreams → fragments, whole objects
//!   ↓
//! normalize    → per-datastream rewrite rules to a fixed point
//!   ↓
//! legacy       → LegacyObject container, shared MODS term tables
//!   ↓
//! cocina       → canonical model and validation
//!   ↓
//! dates        → Logos date lexer, encoding validity
//!   ↓
//! vocab        → injected lookup tables (embedded YAML)
//!   ↓
//! base         → owned XML tree, identifiers
//! ```

// ============================================================================
// MODULES (dependency order: base → vocab → cocina → normalize → mappers)
// ============================================================================

/// Foundation types: XmlElement, identifier helpers
pub mod base;

/// Error taxonomy shared by every mapper
pub mod error;

/// File set and file identifiers
pub mod ids;

/// Lookup tables: roles, identifier types, licenses, catalogs
pub mod vocab;

/// Date encodings: EDTF, W3CDTF, ISO 8601, MARC
pub mod dates;

/// Canonical object model and validation
pub mod cocina;

/// Legacy datastream container
pub mod legacy;

/// Normalization rules per datastream
pub mod normalize;

/// Legacy XML → canonical model
pub mod from_legacy;

/// Canonical model → legacy XML
pub mod to_legacy;

/// Round-trip verification
pub mod roundtrip;

/// Canonical model → DataCite attributes
pub mod datacite;

// Re-export the entry points
pub use base::XmlElement;
pub use cocina::{Fragment, RepositoryObject};
pub use datacite::DataciteProjector;
pub use error::{MappingError, Result};
pub use from_legacy::FromLegacy;
pub use ids::IdGenerator;
pub use legacy::{Datastream, LegacyObject};
pub use normalize::{Normalizer, normalize};
pub use roundtrip::{RoundtripReport, RoundtripValidator};
pub use to_legacy::ToLegacy;
pub use vocab::Vocabulary;
