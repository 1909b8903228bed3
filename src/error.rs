//! Error types for mapping operations.

use thiserror::Error;

/// Errors that can occur while mapping between legacy XML, Cocina, and DataCite.
#[derive(Debug, Error)]
pub enum MappingError {
    /// A required discriminator is missing or holds an unrecognized value.
    #[error("Unmappable {datastream}: {message}")]
    UnmappableDocument {
        datastream: &'static str,
        message: String,
    },

    /// A canonical structure was constructed with an invalid shape.
    #[error("Schema violation at {path}: {message}")]
    SchemaViolation { path: String, message: String },

    /// Normalized re-serialization differs from the normalized original.
    #[error("Roundtrip mismatch in {datastream}: {diff}")]
    RoundtripMismatch {
        datastream: &'static str,
        diff: String,
    },

    /// An object type the caller should have filtered out.
    #[error("Unsupported object type: {0}")]
    UnsupportedObjectType(String),

    /// XML parsing or serialization error.
    #[error("XML error: {0}")]
    Xml(String),

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Lookup table could not be loaded.
    #[error("Vocabulary error: {0}")]
    Vocabulary(String),
}

impl MappingError {
    /// Create an unmappable document error.
    pub fn unmappable(datastream: &'static str, message: impl Into<String>) -> Self {
        Self::UnmappableDocument {
            datastream,
            message: message.into(),
        }
    }

    /// Create a schema violation at a JSON-pointer-ish path.
    pub fn schema(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SchemaViolation {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an XML error.
    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml(message.into())
    }

    /// Returns true for the errors a caller should treat as fatal for one object.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::RoundtripMismatch { .. })
    }
}

impl From<serde_json::Error> for MappingError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}

impl From<quick_xml::Error> for MappingError {
    fn from(e: quick_xml::Error) -> Self {
        Self::Xml(e.to_string())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MappingError>;
