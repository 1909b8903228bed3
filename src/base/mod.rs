//! Foundation types: the owned XML tree and object identifier helpers.

mod xml;

pub use xml::{XmlElement, XmlNode, collapse_whitespace, local};

/// Namespace prefix carried by repository object identifiers.
pub const DRUID_PREFIX: &str = "druid:";

/// Base URL for persistent object links.
pub const PURL_BASE: &str = "https://purl.stanford.edu/";

/// Identifier without its `druid:` prefix.
pub fn bare_druid(druid: &str) -> &str {
    druid.strip_prefix(DRUID_PREFIX).unwrap_or(druid)
}

/// Identifier with its `druid:` prefix, adding it when missing.
pub fn prefixed_druid(druid: &str) -> String {
    format!("{DRUID_PREFIX}{}", bare_druid(druid))
}

/// Persistent URL for an object.
pub fn purl_for(druid: &str) -> String {
    format!("{PURL_BASE}{}", bare_druid(druid))
}

/// Prefix of object URIs in relationship documents.
pub const FEDORA_URI_PREFIX: &str = "info:fedora/";

/// `info:fedora/druid:<id>` for any spelling of an object id.
pub fn fedora_uri(id: &str) -> String {
    let bare = bare_druid(id.strip_prefix(FEDORA_URI_PREFIX).unwrap_or(id));
    format!("{FEDORA_URI_PREFIX}{DRUID_PREFIX}{bare}")
}

/// Check the `druid:xx999xx9999` shape (consonant pairs exclude vowels and `l`).
pub fn is_valid_druid(druid: &str) -> bool {
    let Some(bare) = druid.strip_prefix(DRUID_PREFIX) else {
        return false;
    };
    let chars: Vec<char> = bare.chars().collect();
    if chars.len() != 11 {
        return false;
    }
    let letter = |c: char| c.is_ascii_lowercase() && !"aeioul".contains(c);
    let digit = |c: char| c.is_ascii_digit();
    letter(chars[0])
        && letter(chars[1])
        && chars[2..5].iter().all(|c| digit(*c))
        && letter(chars[5])
        && letter(chars[6])
        && chars[7..11].iter().all(|c| digit(*c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_druid_prefix_helpers() {
        assert_eq!(bare_druid("druid:bc123df4567"), "bc123df4567");
        assert_eq!(bare_druid("bc123df4567"), "bc123df4567");
        assert_eq!(prefixed_druid("bc123df4567"), "druid:bc123df4567");
        assert_eq!(
            purl_for("druid:bc123df4567"),
            "https://purl.stanford.edu/bc123df4567"
        );
        assert_eq!(fedora_uri("druid:bc123df4567"), "info:fedora/druid:bc123df4567");
        assert_eq!(fedora_uri("info:fedora/bc123df4567"), "info:fedora/druid:bc123df4567");
    }

    #[test]
    fn test_druid_validation() {
        assert!(is_valid_druid("druid:bc123df4567"));
        assert!(!is_valid_druid("bc123df4567"));
        assert!(!is_valid_druid("druid:ba123df4567"));
        assert!(!is_valid_druid("druid:bc123df456"));
    }
}
