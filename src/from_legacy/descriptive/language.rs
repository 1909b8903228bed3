//! `language` → language.

use super::{primary_status, read_terms};
use crate::base::XmlElement;
use crate::cocina::{DescriptiveValue, Language};

pub(super) fn read(element: &XmlElement) -> Vec<Language> {
    element.children_named("language").map(read_language).collect()
}

/// Shared with `languageOfCataloging`.
pub(super) fn read_language(language: &XmlElement) -> Language {
    let term = read_terms(language, "languageTerm");
    let script = language
        .child("scriptTerm")
        .map(|_| read_terms(language, "scriptTerm"))
        .filter(|script| *script != DescriptiveValue::default());
    Language {
        code: term.code,
        value: term.value,
        uri: term.uri,
        source: term.source,
        status: primary_status(language),
        display_label: language.attr("displayLabel").map(str::to_string),
        script,
    }
}
