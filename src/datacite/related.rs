//! Related resources → relatedItems and relatedIdentifiers.

use tracing::warn;

use super::attributes::{RelatedIdentifier, RelatedItem, RelatedItemIdentifier, Title};
use crate::cocina::{DescriptiveValue, RelatedResource};

const PREFERRED_CITATION: &str = "preferred citation";
const REFERENCES: &str = "References";
const RELATED_ITEM_TYPE: &str = "Other";

const DOI_RESOLVER: &str = "https://doi.org/";
const ARXIV_BASE: &str = "https://arxiv.org/abs/";
const PUBMED_BASE: &str = "https://pubmed.ncbi.nlm.nih.gov/";

/// Related resource type → DataCite relationType.
const RELATION_TYPES: &[(&str, &str)] = &[
    ("has part", "HasPart"),
    ("part of", "IsPartOf"),
    ("has version", "HasVersion"),
    ("version of record", "IsVersionOf"),
    ("has original version", "IsVersionOf"),
    ("supplement to", "IsSupplementTo"),
    ("supplemented by", "IsSupplementedBy"),
    ("referenced by", "IsReferencedBy"),
    ("references", "References"),
    ("described by", "IsDescribedBy"),
    ("derived from", "IsDerivedFrom"),
    ("source of", "IsSourceOf"),
];

/// An identifier in a scheme DataCite recognizes.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Recognized {
    identifier: String,
    scheme: &'static str,
    /// What a reader would follow.
    display: String,
}

pub(super) fn project(related: &[RelatedResource]) -> (Vec<RelatedItem>, Vec<RelatedIdentifier>) {
    let mut items = Vec::new();
    let mut identifiers = Vec::new();
    for resource in related {
        let Some((item, identifier)) = project_one(resource) else {
            warn!(kind = resource.kind.as_deref(), "related resource without title, note or identifier omitted");
            continue;
        };
        items.push(item);
        identifiers.extend(identifier);
    }
    (items, identifiers)
}

fn project_one(resource: &RelatedResource) -> Option<(RelatedItem, Option<RelatedIdentifier>)> {
    let relation_type = relation_type(resource.kind.as_deref());

    if let Some(recognized) = recognized(resource) {
        let item = RelatedItem {
            related_item_type: RELATED_ITEM_TYPE.to_string(),
            relation_type: relation_type.to_string(),
            titles: vec![title(recognized.display)],
            related_item_identifier: Some(RelatedItemIdentifier {
                related_item_identifier: recognized.identifier.clone(),
                related_item_identifier_type: recognized.scheme.to_string(),
            }),
        };
        let identifier = RelatedIdentifier {
            related_identifier: recognized.identifier,
            related_identifier_type: recognized.scheme.to_string(),
            relation_type: relation_type.to_string(),
        };
        return Some((item, Some(identifier)));
    }

    let citation = resource
        .note
        .iter()
        .find(|note| note.kind_is(PREFERRED_CITATION))
        .and_then(|note| note.value.clone());
    if let Some(citation) = citation {
        return Some((untitled_item(REFERENCES, citation), None));
    }

    let text = resource.title.first().and_then(DescriptiveValue::display_text)?;
    Some((untitled_item(relation_type, text), None))
}

fn untitled_item(relation_type: &str, text: String) -> RelatedItem {
    RelatedItem {
        related_item_type: RELATED_ITEM_TYPE.to_string(),
        relation_type: relation_type.to_string(),
        titles: vec![title(text)],
        related_item_identifier: None,
    }
}

fn title(text: String) -> Title {
    Title {
        title: text,
        title_type: None,
    }
}

fn relation_type(kind: Option<&str>) -> &'static str {
    kind.and_then(|kind| RELATION_TYPES.iter().find(|(k, _)| *k == kind))
        .map_or(REFERENCES, |(_, relation)| *relation)
}

// ============================================================================
// IDENTIFIER SCHEMES
// ============================================================================

/// Identifiers first, then access URLs.
fn recognized(resource: &RelatedResource) -> Option<Recognized> {
    resource
        .identifier
        .iter()
        .find_map(recognize)
        .or_else(|| {
            resource
                .access
                .as_ref()
                .and_then(|access| access.url.iter().find_map(|url| url.value.as_deref()))
                .map(url)
        })
}

fn recognize(identifier: &DescriptiveValue) -> Option<Recognized> {
    let kind = identifier.kind.as_deref().map(str::to_ascii_lowercase);
    let text = identifier.value.as_deref().or(identifier.uri.as_deref())?;
    match kind.as_deref() {
        Some("doi") => Some(doi(text)),
        Some("arxiv") => Some(Recognized {
            identifier: text.to_string(),
            scheme: "arXiv",
            display: format!("{ARXIV_BASE}{text}"),
        }),
        Some("pmid") => Some(Recognized {
            identifier: text.to_string(),
            scheme: "PMID",
            display: format!("{PUBMED_BASE}{text}"),
        }),
        _ if text.contains("doi.org/10.") => Some(doi(text)),
        Some("uri") | Some("url") | None if is_url(text) => Some(url(text)),
        _ => None,
    }
}

fn doi(text: &str) -> Recognized {
    let bare = text
        .find("10.")
        .map_or(text, |start| &text[start..])
        .to_string();
    Recognized {
        display: format!("{DOI_RESOLVER}{bare}"),
        identifier: bare,
        scheme: "DOI",
    }
}

fn url(text: &str) -> Recognized {
    Recognized {
        identifier: text.to_string(),
        scheme: "URL",
        display: text.to_string(),
    }
}

fn is_url(text: &str) -> bool {
    text.starts_with("https://") || text.starts_with("http://")
}
