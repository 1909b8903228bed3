//! Descriptive metadata.
//!
//! [`DescriptiveValue`] is the recursive node behind titles, forms, subjects,
//! notes, identifiers, dates and roles. A node holds at most one of `value`,
//! `structuredValue`, `parallelValue` and `groupedValue`; the last three nest
//! further nodes of the same type.

use serde::{Deserialize, Serialize};

use crate::dates::{self, DateEncoding};

/// Deepest nesting the validator and mappers will follow.
pub const MAX_DEPTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Description {
    #[serde(default)]
    pub title: Vec<DescriptiveValue>,
    #[serde(default)]
    pub contributor: Vec<Contributor>,
    #[serde(default)]
    pub event: Vec<Event>,
    #[serde(default)]
    pub form: Vec<DescriptiveValue>,
    #[serde(default)]
    pub language: Vec<Language>,
    #[serde(default)]
    pub note: Vec<DescriptiveValue>,
    #[serde(default)]
    pub identifier: Vec<DescriptiveValue>,
    #[serde(default)]
    pub subject: Vec<DescriptiveValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<DescriptiveAccessMetadata>,
    #[serde(default)]
    pub related_resource: Vec<RelatedResource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_metadata: Option<AdminMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purl: Option<String>,
}

/// A recursive descriptive node.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptiveValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default)]
    pub structured_value: Vec<DescriptiveValue>,
    #[serde(default)]
    pub parallel_value: Vec<DescriptiveValue>,
    #[serde(default)]
    pub grouped_value: Vec<DescriptiveValue>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard: Option<Source>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<Source>,
    #[serde(default)]
    pub identifier: Vec<DescriptiveValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<String>,
    #[serde(default)]
    pub note: Vec<DescriptiveValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_language: Option<Box<Language>>,
}

impl DescriptiveValue {
    pub fn of(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn typed(value: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            kind: Some(kind.into()),
            ..Default::default()
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn kind_is(&self, kind: &str) -> bool {
        self.kind.as_deref() == Some(kind)
    }

    pub fn is_primary(&self) -> bool {
        self.status.as_deref() == Some("primary")
    }

    /// Number of value shapes present; more than one is a schema violation.
    pub fn shape_count(&self) -> usize {
        usize::from(self.value.is_some())
            + usize::from(!self.structured_value.is_empty())
            + usize::from(!self.parallel_value.is_empty())
            + usize::from(!self.grouped_value.is_empty())
    }

    /// Child of a structured value with the given type.
    pub fn part(&self, kind: &str) -> Option<&DescriptiveValue> {
        self.structured_value.iter().find(|p| p.kind_is(kind))
    }

    /// Value of a structured part with the given type.
    pub fn part_value(&self, kind: &str) -> Option<&str> {
        self.part(kind).and_then(|p| p.value.as_deref())
    }

    pub fn source_code(&self) -> Option<&str> {
        self.source.as_ref().and_then(|s| s.code.as_deref())
    }

    pub fn source_value(&self) -> Option<&str> {
        self.source.as_ref().and_then(|s| s.value.as_deref())
    }

    pub fn encoding_code(&self) -> Option<&str> {
        self.encoding.as_ref().and_then(|s| s.code.as_deref())
    }

    /// Flattened display text: the value itself, or structured parts joined by spaces.
    pub fn display_text(&self) -> Option<String> {
        if let Some(value) = &self.value {
            return Some(value.clone());
        }
        if let Some(first) = self.parallel_value.first() {
            return first.display_text();
        }
        let parts: Vec<String> = self
            .structured_value
            .iter()
            .filter_map(DescriptiveValue::display_text)
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

/// Authority or scheme reference (used for `source`, `standard` and `encoding`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub note: Vec<DescriptiveValue>,
}

impl Source {
    pub fn code(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            ..Default::default()
        }
    }

    pub fn value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_none()
            && self.uri.is_none()
            && self.value.is_none()
            && self.version.is_none()
            && self.note.is_empty()
    }
}

// ============================================================================
// CONTRIBUTORS AND EVENTS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContributorType {
    Person,
    Family,
    Organization,
    Conference,
    Event,
    Unspecified,
}

impl ContributorType {
    /// From a MODS `name@type`.
    pub fn from_mods(name_type: &str) -> Option<Self> {
        match name_type {
            "personal" => Some(Self::Person),
            "family" => Some(Self::Family),
            "corporate" => Some(Self::Organization),
            "conference" => Some(Self::Conference),
            _ => None,
        }
    }

    pub fn mods(self) -> Option<&'static str> {
        match self {
            Self::Person => Some("personal"),
            Self::Family => Some("family"),
            Self::Organization => Some("corporate"),
            Self::Conference => Some("conference"),
            Self::Event | Self::Unspecified => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contributor {
    #[serde(default)]
    pub name: Vec<DescriptiveValue>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ContributorType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default)]
    pub role: Vec<DescriptiveValue>,
    #[serde(default)]
    pub identifier: Vec<DescriptiveValue>,
    #[serde(default)]
    pub note: Vec<DescriptiveValue>,
    #[serde(default)]
    pub affiliation: Vec<DescriptiveValue>,
}

impl Contributor {
    pub fn is_primary(&self) -> bool {
        self.status.as_deref() == Some("primary")
    }

    /// Whether any role matches the term or MARC relator code.
    pub fn has_role(&self, term: &str, code: &str) -> bool {
        self.role.iter().any(|r| {
            r.value
                .as_deref()
                .is_some_and(|v| v.eq_ignore_ascii_case(term))
                || r.code.as_deref() == Some(code)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_label: Option<String>,
    #[serde(default)]
    pub date: Vec<DescriptiveValue>,
    #[serde(default)]
    pub contributor: Vec<Contributor>,
    #[serde(default)]
    pub location: Vec<DescriptiveValue>,
    #[serde(default)]
    pub identifier: Vec<DescriptiveValue>,
    #[serde(default)]
    pub note: Vec<DescriptiveValue>,
    #[serde(default)]
    pub parallel_event: Vec<Event>,
    /// Language and script of the event's values as a whole.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_language: Option<Language>,
}

impl Event {
    pub fn kind_is(&self, kind: &str) -> bool {
        self.kind.as_deref() == Some(kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<DescriptiveValue>,
}

// ============================================================================
// RELATED RESOURCES, ACCESS, ADMIN METADATA
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedResource {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_label: Option<String>,
    #[serde(default)]
    pub title: Vec<DescriptiveValue>,
    #[serde(default)]
    pub contributor: Vec<Contributor>,
    #[serde(default)]
    pub event: Vec<Event>,
    #[serde(default)]
    pub form: Vec<DescriptiveValue>,
    #[serde(default)]
    pub language: Vec<Language>,
    #[serde(default)]
    pub note: Vec<DescriptiveValue>,
    #[serde(default)]
    pub identifier: Vec<DescriptiveValue>,
    #[serde(default)]
    pub subject: Vec<DescriptiveValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purl: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<DescriptiveAccessMetadata>,
    #[serde(default)]
    pub related_resource: Vec<RelatedResource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_metadata: Option<AdminMetadata>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptiveAccessMetadata {
    #[serde(default)]
    pub url: Vec<DescriptiveValue>,
    #[serde(default)]
    pub physical_location: Vec<DescriptiveValue>,
    #[serde(default)]
    pub digital_location: Vec<DescriptiveValue>,
    #[serde(default)]
    pub access_contact: Vec<DescriptiveValue>,
    #[serde(default)]
    pub digital_repository: Vec<DescriptiveValue>,
    #[serde(default)]
    pub note: Vec<DescriptiveValue>,
}

impl DescriptiveAccessMetadata {
    pub fn is_empty(&self) -> bool {
        self.url.is_empty()
            && self.physical_location.is_empty()
            && self.digital_location.is_empty()
            && self.access_contact.is_empty()
            && self.digital_repository.is_empty()
            && self.note.is_empty()
    }
}

/// Provenance of the descriptive record itself.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminMetadata {
    #[serde(default)]
    pub contributor: Vec<Contributor>,
    #[serde(default)]
    pub event: Vec<Event>,
    #[serde(default)]
    pub language: Vec<Language>,
    #[serde(default)]
    pub note: Vec<DescriptiveValue>,
    #[serde(default)]
    pub metadata_standard: Vec<Source>,
    #[serde(default)]
    pub identifier: Vec<DescriptiveValue>,
}

impl AdminMetadata {
    pub fn is_empty(&self) -> bool {
        self.contributor.is_empty()
            && self.event.is_empty()
            && self.language.is_empty()
            && self.note.is_empty()
            && self.metadata_standard.is_empty()
            && self.identifier.is_empty()
    }
}

// ============================================================================
// DATE VALIDITY
// ============================================================================

/// A date whose value does not parse under its declared encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidDate {
    /// JSON-pointer-ish location of the date node.
    pub path: String,
    pub value: String,
    pub encoding: String,
}

impl Description {
    /// The event of the given type, if any.
    pub fn event_of(&self, kind: &str) -> Option<&Event> {
        self.event.iter().find(|e| e.kind_is(kind))
    }

    /// Every encoded date whose value fails its (possibly inherited) encoding.
    /// Structured ranges are checked per component.
    pub fn date_validity_report(&self) -> Vec<InvalidDate> {
        let mut report = Vec::new();
        for (i, event) in self.event.iter().enumerate() {
            collect_event_dates(event, &format!("/event/{i}"), &mut report);
        }
        for (i, related) in self.related_resource.iter().enumerate() {
            for (j, event) in related.event.iter().enumerate() {
                collect_event_dates(
                    event,
                    &format!("/relatedResource/{i}/event/{j}"),
                    &mut report,
                );
            }
        }
        report
    }
}

fn collect_event_dates(event: &Event, path: &str, report: &mut Vec<InvalidDate>) {
    for (i, date) in event.date.iter().enumerate() {
        collect_dates(date, None, &format!("{path}/date/{i}"), 0, report);
    }
    for (i, parallel) in event.parallel_event.iter().enumerate() {
        collect_event_dates(parallel, &format!("{path}/parallelEvent/{i}"), report);
    }
}

fn collect_dates(
    date: &DescriptiveValue,
    inherited: Option<&str>,
    path: &str,
    depth: usize,
    report: &mut Vec<InvalidDate>,
) {
    if depth > MAX_DEPTH {
        return;
    }
    let encoding = date.encoding_code().or(inherited);
    if let (Some(value), Some(code)) = (&date.value, encoding) {
        if let Some(parsed) = DateEncoding::from_code(code) {
            if !dates::is_valid(value, parsed) {
                report.push(InvalidDate {
                    path: path.to_string(),
                    value: value.clone(),
                    encoding: code.to_string(),
                });
            }
        }
    }
    for (name, children) in [
        ("structuredValue", &date.structured_value),
        ("parallelValue", &date.parallel_value),
    ] {
        for (i, child) in children.iter().enumerate() {
            collect_dates(child, encoding, &format!("{path}/{name}/{i}"), depth + 1, report);
        }
    }
}
