//! DataCite attribute document.
//!
//! Field names and enumerated values follow the DataCite REST API schema;
//! the document is submitted to the registrar verbatim.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub creators: Vec<Creator>,
    pub contributors: Vec<Creator>,
    pub titles: Vec<Title>,
    pub publisher: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<Types>,
    pub dates: Vec<Date>,
    pub descriptions: Vec<DescriptionEntry>,
    pub subjects: Vec<Subject>,
    pub rights_list: Vec<RightsEntry>,
    pub funding_references: Vec<FundingReference>,
    pub related_items: Vec<RelatedItem>,
    pub related_identifiers: Vec<RelatedIdentifier>,
}

/// A creator, or a contributor when `contributor_type` is set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Creator {
    pub name: String,
    pub name_type: NameType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub name_identifiers: Vec<NameIdentifier>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub affiliation: Vec<Affiliation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contributor_type: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum NameType {
    #[default]
    Personal,
    Organizational,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NameIdentifier {
    pub name_identifier: String,
    pub name_identifier_scheme: String,
    #[serde(rename = "schemeURI")]
    pub scheme_uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Affiliation {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affiliation_identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affiliation_identifier_scheme: Option<String>,
    #[serde(rename = "schemeURI", skip_serializing_if = "Option::is_none")]
    pub scheme_uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Title {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Types {
    pub resource_type_general: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Date {
    pub date: String,
    pub date_type: DateType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_information: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DateType {
    Submitted,
    Issued,
    Available,
    Created,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptionEntry {
    pub description: String,
    pub description_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_scheme: Option<String>,
    #[serde(rename = "schemeURI", skip_serializing_if = "Option::is_none")]
    pub scheme_uri: Option<String>,
    #[serde(rename = "valueURI", skip_serializing_if = "Option::is_none")]
    pub value_uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RightsEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rights: Option<String>,
    #[serde(rename = "rightsUri")]
    pub rights_uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingReference {
    pub funder_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funder_identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funder_identifier_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedItem {
    pub related_item_type: String,
    pub relation_type: String,
    pub titles: Vec<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_item_identifier: Option<RelatedItemIdentifier>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedItemIdentifier {
    pub related_item_identifier: String,
    pub related_item_identifier_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedIdentifier {
    pub related_identifier: String,
    pub related_identifier_type: String,
    pub relation_type: String,
}
