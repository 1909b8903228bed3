//! Stable identifiers for structural sub-resources (file sets and files).
//!
//! Historical identifiers embed the object id followed by a slash
//! (`.../fileSet/bc123kj8759/resource123`); current ones use a hyphen
//! (`.../fileSet/bc123kj8759-resource123`). Both normalize to the hyphen form.

use crate::base::bare_druid;

/// Prefix for file set identifiers.
pub const FILE_SET_PREFIX: &str = "https://cocina.sul.stanford.edu/fileSet/";

/// Prefix for file identifiers.
pub const FILE_PREFIX: &str = "https://cocina.sul.stanford.edu/file/";

/// Source of fresh suffixes for identifiers that have no legacy id.
pub trait SuffixSource {
    fn next_suffix(&mut self) -> String;
}

/// Random v4 UUID suffixes.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidSuffix;

impl SuffixSource for UuidSuffix {
    fn next_suffix(&mut self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Always returns the same suffix.
#[derive(Debug, Clone)]
pub struct FixedSuffix(pub String);

impl SuffixSource for FixedSuffix {
    fn next_suffix(&mut self) -> String {
        self.0.clone()
    }
}

/// Generates file set and file identifiers for one object at a time.
#[derive(Debug, Default)]
pub struct IdGenerator<S: SuffixSource = UuidSuffix> {
    source: S,
}

impl IdGenerator<UuidSuffix> {
    pub fn new() -> Self {
        Self { source: UuidSuffix }
    }
}

impl<S: SuffixSource> IdGenerator<S> {
    /// Use an injected suffix source.
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    /// Identifier for a file set, reusing `resource_id` when given.
    pub fn file_set_id(&mut self, object_id: &str, resource_id: Option<&str>) -> String {
        let bare = bare_druid(object_id);
        match resource_id {
            Some(id) if is_uri(id) => collapse_object_slash(id, bare),
            Some(id) => format!("{FILE_SET_PREFIX}{bare}-{id}"),
            None => format!("{FILE_SET_PREFIX}{bare}-{}", self.source.next_suffix()),
        }
    }

    /// Identifier for a file within a file set.
    pub fn file_id(
        &mut self,
        object_id: &str,
        resource_id: Option<&str>,
        file_id: Option<&str>,
    ) -> String {
        let bare = bare_druid(object_id);
        if let Some(id) = file_id.filter(|id| is_uri(id)) {
            return collapse_object_slash(id, bare);
        }
        let resource = match resource_id {
            Some(id) => resource_suffix(id, bare),
            None => self.source.next_suffix(),
        };
        let file = match file_id {
            Some(id) => id.to_string(),
            None => self.source.next_suffix(),
        };
        format!("{FILE_PREFIX}{bare}-{resource}/{file}")
    }
}

/// Legacy resource id for a file set identifier (inverse of [`IdGenerator::file_set_id`]).
pub fn resource_suffix(file_set_id: &str, object_id: &str) -> String {
    let bare = bare_druid(object_id);
    if !is_uri(file_set_id) {
        return file_set_id.to_string();
    }
    let normalized = collapse_object_slash(file_set_id, bare);
    let hyphenated = format!("{FILE_SET_PREFIX}{bare}-");
    if let Some(rest) = normalized.strip_prefix(&hyphenated) {
        return rest.to_string();
    }
    normalized
        .rsplit('/')
        .next()
        .unwrap_or(normalized.as_str())
        .to_string()
}

fn is_uri(id: &str) -> bool {
    id.starts_with("https://") || id.starts_with("http://")
}

/// Replace the first `<object>/` path segment with `<object>-`.
fn collapse_object_slash(id: &str, bare: &str) -> String {
    let needle = format!("/{bare}/");
    match id.find(&needle) {
        Some(pos) => {
            let mut out = String::with_capacity(id.len());
            out.push_str(&id[..pos]);
            out.push('/');
            out.push_str(bare);
            out.push('-');
            out.push_str(&id[pos + needle.len()..]);
            out
        }
        None => id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed() -> IdGenerator<FixedSuffix> {
        IdGenerator::with_source(FixedSuffix("123-234-975".to_string()))
    }

    #[test]
    fn test_file_set_id_collapses_historical_shape() {
        let id = fixed().file_set_id(
            "druid:bc123kj8759",
            Some("https://cocina.sul.stanford.edu/fileSet/bc123kj8759/resource123"),
        );
        assert_eq!(
            id,
            "https://cocina.sul.stanford.edu/fileSet/bc123kj8759-resource123"
        );
    }

    #[test]
    fn test_file_set_id_keeps_current_shape() {
        let current = "https://cocina.sul.stanford.edu/fileSet/bc123kj8759-resource123";
        assert_eq!(fixed().file_set_id("druid:bc123kj8759", Some(current)), current);
    }

    #[test]
    fn test_file_set_id_from_bare_suffix() {
        assert_eq!(
            fixed().file_set_id("druid:bc123kj8759", Some("bc123kj8759_1")),
            "https://cocina.sul.stanford.edu/fileSet/bc123kj8759-bc123kj8759_1"
        );
    }

    #[test]
    fn test_file_set_id_uses_injected_source() {
        assert_eq!(
            fixed().file_set_id("druid:bc123kj8759", None),
            "https://cocina.sul.stanford.edu/fileSet/bc123kj8759-123-234-975"
        );
    }

    #[test]
    fn test_file_id_shapes() {
        let mut ids = fixed();
        assert_eq!(
            ids.file_id(
                "druid:bc123kj8759",
                None,
                Some("https://cocina.sul.stanford.edu/file/bc123kj8759/resource123/00001.jp2")
            ),
            "https://cocina.sul.stanford.edu/file/bc123kj8759-resource123/00001.jp2"
        );
        assert_eq!(
            ids.file_id("druid:bc123kj8759", Some("resource123"), Some("00001.jp2")),
            "https://cocina.sul.stanford.edu/file/bc123kj8759-resource123/00001.jp2"
        );
        assert_eq!(
            ids.file_id("druid:bc123kj8759", Some("resource123"), None),
            "https://cocina.sul.stanford.edu/file/bc123kj8759-resource123/123-234-975"
        );
    }

    #[test]
    fn test_file_id_accepts_full_file_set_id() {
        let mut ids = fixed();
        assert_eq!(
            ids.file_id(
                "druid:bc123kj8759",
                Some("https://cocina.sul.stanford.edu/fileSet/bc123kj8759-resource123"),
                Some("a.txt")
            ),
            "https://cocina.sul.stanford.edu/file/bc123kj8759-resource123/a.txt"
        );
    }

    #[test]
    fn test_resource_suffix_inverts_file_set_id() {
        let mut ids = fixed();
        let id = ids.file_set_id("druid:bc123kj8759", Some("bc123kj8759_1"));
        assert_eq!(resource_suffix(&id, "druid:bc123kj8759"), "bc123kj8759_1");
    }

    #[test]
    fn test_uuid_source_is_random() {
        let mut ids = IdGenerator::new();
        let a = ids.file_set_id("druid:bc123kj8759", None);
        let b = ids.file_set_id("druid:bc123kj8759", None);
        assert_ne!(a, b);
    }
}
