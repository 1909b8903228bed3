//! Contributors → creators, contributors and funding references.
//!
//! ```text
//! role funder                     → fundingReferences
//! primary, or not marked uncited  → creators (no contributorType)
//! everything else                 → contributors (contributorType by role, else Other)
//! ```

use tracing::warn;

use super::attributes::{Affiliation, Creator, FundingReference, NameIdentifier, NameType};
use crate::cocina::{Contributor, ContributorType, DescriptiveValue};
use crate::vocab::Vocabulary;

const FUNDER_TERM: &str = "funder";
const FUNDER_CODE: &str = "fnd";
const OTHER_CONTRIBUTOR_TYPE: &str = "Other";
const CITATION_STATUS: &str = "citation status";

const ORCID: &str = "ORCID";
const ORCID_SCHEME_URI: &str = "https://orcid.org";
const ROR: &str = "ROR";
const ROR_SCHEME_URI: &str = "https://ror.org";

#[derive(Debug, Default)]
pub(super) struct Agents {
    pub(super) creators: Vec<Creator>,
    pub(super) contributors: Vec<Creator>,
    pub(super) funding_references: Vec<FundingReference>,
}

pub(super) fn project(vocab: &Vocabulary, contributors: &[Contributor]) -> Agents {
    let mut agents = Agents::default();
    for contributor in contributors {
        if contributor.has_role(FUNDER_TERM, FUNDER_CODE) {
            agents.funding_references.extend(funding_reference(contributor));
            continue;
        }
        let Some(mut agent) = agent(contributor) else {
            warn!("contributor without a name omitted");
            continue;
        };
        if is_cited(contributor) {
            agents.creators.push(agent);
        } else {
            agent.contributor_type = Some(contributor_type(vocab, contributor).to_string());
            agents.contributors.push(agent);
        }
    }
    agents
}

fn is_cited(contributor: &Contributor) -> bool {
    contributor.is_primary()
        || !contributor.note.iter().any(|note| {
            note.kind_is(CITATION_STATUS) && note.value.as_deref() == Some("false")
        })
}

/// The first role that maps to a DataCite contributorType.
fn contributor_type<'v>(vocab: &'v Vocabulary, contributor: &Contributor) -> &'v str {
    contributor
        .role
        .iter()
        .filter_map(|role| {
            role.value
                .as_deref()
                .or_else(|| role.code.as_deref().and_then(|code| vocab.role_term(code)))
        })
        .find_map(|term| vocab.datacite_contributor_type(term))
        .unwrap_or(OTHER_CONTRIBUTOR_TYPE)
}

// ============================================================================
// NAMES
// ============================================================================

fn agent(contributor: &Contributor) -> Option<Creator> {
    let name = contributor.name.first()?;
    let name = name.parallel_value.first().unwrap_or(name);
    let organizational = matches!(
        contributor.kind,
        Some(ContributorType::Organization | ContributorType::Conference)
    );

    let mut agent = if organizational {
        Creator {
            name: name.display_text()?,
            name_type: NameType::Organizational,
            ..Default::default()
        }
    } else {
        personal_name(name)?
    };
    agent.name_identifiers = contributor
        .identifier
        .iter()
        .filter_map(orcid)
        .collect();
    agent.affiliation = contributor.affiliation.iter().filter_map(affiliation).collect();
    Some(agent)
}

/// `Surname, Forename` when the name is structured.
fn personal_name(name: &DescriptiveValue) -> Option<Creator> {
    let forename = name.part_value("forename");
    let surname = name.part_value("surname");
    let display = match (surname, forename) {
        (Some(surname), Some(forename)) => format!("{surname}, {forename}"),
        (Some(only), None) | (None, Some(only)) => only.to_string(),
        (None, None) => name.display_text()?,
    };
    Some(Creator {
        name: display,
        name_type: NameType::Personal,
        given_name: forename.map(str::to_string),
        family_name: surname.map(str::to_string),
        ..Default::default()
    })
}

fn orcid(identifier: &DescriptiveValue) -> Option<NameIdentifier> {
    let is_orcid = identifier
        .kind
        .as_deref()
        .is_some_and(|kind| kind.eq_ignore_ascii_case(ORCID))
        || identifier.uri.as_deref().is_some_and(|uri| uri.starts_with(ORCID_SCHEME_URI));
    if !is_orcid {
        return None;
    }
    let value = identifier.uri.clone().or_else(|| {
        identifier
            .value
            .as_deref()
            .map(|id| format!("{ORCID_SCHEME_URI}/{}", id.trim_start_matches('/')))
    })?;
    Some(NameIdentifier {
        name_identifier: value,
        name_identifier_scheme: ORCID.to_string(),
        scheme_uri: ORCID_SCHEME_URI.to_string(),
    })
}

// ============================================================================
// AFFILIATIONS
// ============================================================================

/// A ROR identifier on the value, if any.
fn ror(value: &DescriptiveValue) -> Option<String> {
    value.identifier.iter().find_map(|identifier| {
        let uri = identifier.uri.as_deref().or(identifier.value.as_deref())?;
        let recognized = identifier
            .kind
            .as_deref()
            .is_some_and(|kind| kind.eq_ignore_ascii_case(ROR))
            || uri.starts_with(ROR_SCHEME_URI);
        recognized.then(|| uri.to_string())
    })
}

fn with_ror(name: String, identifier: Option<String>) -> Affiliation {
    match identifier {
        Some(identifier) => Affiliation {
            name,
            affiliation_identifier: Some(identifier),
            affiliation_identifier_scheme: Some(ROR.to_string()),
            scheme_uri: Some(ROR_SCHEME_URI.to_string()),
        },
        None => Affiliation {
            name,
            ..Default::default()
        },
    }
}

/// A structured affiliation whose first part carries a ROR identifier is
/// that institution alone; otherwise the parts are joined.
fn affiliation(value: &DescriptiveValue) -> Option<Affiliation> {
    if let Some(text) = &value.value {
        return Some(with_ror(text.clone(), ror(value)));
    }
    let first = value.structured_value.first()?;
    if let Some(identifier) = ror(first) {
        return Some(with_ror(first.display_text()?, Some(identifier)));
    }
    let joined: Vec<String> = value
        .structured_value
        .iter()
        .filter_map(DescriptiveValue::display_text)
        .collect();
    if joined.is_empty() {
        return None;
    }
    Some(with_ror(joined.join(", "), None))
}

// ============================================================================
// FUNDERS
// ============================================================================

fn funding_reference(contributor: &Contributor) -> Option<FundingReference> {
    let name = contributor.name.first()?;
    let identifier = ror(name).or_else(|| {
        contributor
            .identifier
            .iter()
            .find_map(|id| id.uri.clone().filter(|uri| uri.starts_with(ROR_SCHEME_URI)))
    });
    Some(FundingReference {
        funder_name: name.display_text()?,
        funder_identifier_type: identifier.as_ref().map(|_| ROR.to_string()),
        funder_identifier: identifier,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(forename: &str, surname: &str) -> Contributor {
        Contributor {
            kind: Some(ContributorType::Person),
            name: vec![DescriptiveValue {
                structured_value: vec![
                    DescriptiveValue::typed(forename, "forename"),
                    DescriptiveValue::typed(surname, "surname"),
                ],
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    fn stanford(identifier: bool) -> DescriptiveValue {
        let mut university = DescriptiveValue::of("Stanford University");
        if identifier {
            university.identifier = vec![DescriptiveValue {
                uri: Some("https://ror.org/00f54p054".to_string()),
                kind: Some("ROR".to_string()),
                ..Default::default()
            }];
        }
        DescriptiveValue {
            structured_value: vec![university, DescriptiveValue::of("Woods Institute")],
            ..Default::default()
        }
    }

    #[test]
    fn test_structured_personal_name() {
        let agents = project(Vocabulary::standard(), &[person("Jane", "Stanford")]);
        let creator = &agents.creators[0];
        assert_eq!(creator.name, "Stanford, Jane");
        assert_eq!(creator.given_name.as_deref(), Some("Jane"));
        assert_eq!(creator.name_type, NameType::Personal);
        assert!(creator.contributor_type.is_none());
    }

    #[test]
    fn test_affiliation_identifier_takes_precedence() {
        let with_id = affiliation(&stanford(true)).unwrap();
        assert_eq!(with_id.name, "Stanford University");
        assert_eq!(with_id.affiliation_identifier.as_deref(), Some("https://ror.org/00f54p054"));

        let without = affiliation(&stanford(false)).unwrap();
        assert_eq!(without.name, "Stanford University, Woods Institute");
        assert!(without.affiliation_identifier.is_none());
    }

    #[test]
    fn test_uncited_contributor_gets_type() {
        let mut editor = person("Leland", "Stanford");
        editor.role = vec![DescriptiveValue::of("editor")];
        editor.note = vec![DescriptiveValue::typed("false", CITATION_STATUS)];
        let mut unknown = person("Ada", "Lovelace");
        unknown.note = editor.note.clone();
        let agents = project(Vocabulary::standard(), &[editor, unknown]);
        assert!(agents.creators.is_empty());
        assert_eq!(agents.contributors[0].contributor_type.as_deref(), Some("Editor"));
        assert_eq!(agents.contributors[1].contributor_type.as_deref(), Some("Other"));
    }

    #[test]
    fn test_funder_becomes_funding_reference() {
        let funder = Contributor {
            kind: Some(ContributorType::Organization),
            name: vec![DescriptiveValue::of("National Science Foundation")],
            role: vec![DescriptiveValue {
                value: Some("funder".to_string()),
                code: Some("fnd".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };
        let agents = project(Vocabulary::standard(), &[funder]);
        assert!(agents.creators.is_empty());
        assert_eq!(agents.funding_references[0].funder_name, "National Science Foundation");
    }
}
