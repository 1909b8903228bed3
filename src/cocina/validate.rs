//! Structural validation of descriptive metadata.
//!
//! Checks shape only: required fields, mutually exclusive value shapes and
//! nesting depth. Whether referenced objects exist is not this crate's concern.

use super::description::{
    Contributor, Description, DescriptiveValue, Event, MAX_DEPTH, RelatedResource,
};
use crate::error::{MappingError, Result};

/// Validate a description. Admin policies pass `require_title = false`;
/// titles that are present must still have a value.
pub fn validate_description(description: &Description, path: &str, require_title: bool) -> Result<()> {
    if require_title && description.title.is_empty() {
        return Err(MappingError::schema(
            format!("{path}/title"),
            "at least one title is required",
        ));
    }
    for (i, title) in description.title.iter().enumerate() {
        let title_path = format!("{path}/title/{i}");
        if title.display_text().is_none_or(|t| t.trim().is_empty()) {
            return Err(MappingError::schema(title_path, "title has no value"));
        }
        validate_value(title, &title_path, 0)?;
    }
    validate_values(&description.form, &format!("{path}/form"), 0)?;
    validate_values(&description.note, &format!("{path}/note"), 0)?;
    validate_values(&description.identifier, &format!("{path}/identifier"), 0)?;
    validate_values(&description.subject, &format!("{path}/subject"), 0)?;
    for (i, contributor) in description.contributor.iter().enumerate() {
        validate_contributor(contributor, &format!("{path}/contributor/{i}"), 0)?;
    }
    for (i, event) in description.event.iter().enumerate() {
        validate_event(event, &format!("{path}/event/{i}"), 0)?;
    }
    for (i, related) in description.related_resource.iter().enumerate() {
        validate_related(related, &format!("{path}/relatedResource/{i}"), 1)?;
    }
    Ok(())
}

/// Validate one node and everything nested under it.
pub fn validate_value(value: &DescriptiveValue, path: &str, depth: usize) -> Result<()> {
    if depth > MAX_DEPTH {
        return Err(MappingError::schema(
            path,
            format!("nesting deeper than {MAX_DEPTH}"),
        ));
    }
    if value.shape_count() > 1 {
        return Err(MappingError::schema(
            path,
            "value, structuredValue, parallelValue and groupedValue are mutually exclusive",
        ));
    }
    for (name, children) in [
        ("structuredValue", &value.structured_value),
        ("parallelValue", &value.parallel_value),
        ("groupedValue", &value.grouped_value),
        ("identifier", &value.identifier),
        ("note", &value.note),
    ] {
        validate_values(children, &format!("{path}/{name}"), depth + 1)?;
    }
    Ok(())
}

fn validate_values(values: &[DescriptiveValue], path: &str, depth: usize) -> Result<()> {
    for (i, value) in values.iter().enumerate() {
        validate_value(value, &format!("{path}/{i}"), depth)?;
    }
    Ok(())
}

fn validate_contributor(contributor: &Contributor, path: &str, depth: usize) -> Result<()> {
    validate_values(&contributor.name, &format!("{path}/name"), depth + 1)?;
    validate_values(&contributor.role, &format!("{path}/role"), depth + 1)?;
    validate_values(&contributor.identifier, &format!("{path}/identifier"), depth + 1)?;
    validate_values(&contributor.affiliation, &format!("{path}/affiliation"), depth + 1)?;
    validate_values(&contributor.note, &format!("{path}/note"), depth + 1)
}

fn validate_event(event: &Event, path: &str, depth: usize) -> Result<()> {
    if depth > MAX_DEPTH {
        return Err(MappingError::schema(path, format!("nesting deeper than {MAX_DEPTH}")));
    }
    validate_values(&event.date, &format!("{path}/date"), depth + 1)?;
    validate_values(&event.location, &format!("{path}/location"), depth + 1)?;
    validate_values(&event.note, &format!("{path}/note"), depth + 1)?;
    for (i, contributor) in event.contributor.iter().enumerate() {
        validate_contributor(contributor, &format!("{path}/contributor/{i}"), depth + 1)?;
    }
    for (i, parallel) in event.parallel_event.iter().enumerate() {
        validate_event(parallel, &format!("{path}/parallelEvent/{i}"), depth + 1)?;
    }
    Ok(())
}

fn validate_related(related: &RelatedResource, path: &str, depth: usize) -> Result<()> {
    if depth > MAX_DEPTH {
        return Err(MappingError::schema(path, format!("nesting deeper than {MAX_DEPTH}")));
    }
    validate_values(&related.title, &format!("{path}/title"), depth)?;
    validate_values(&related.form, &format!("{path}/form"), depth)?;
    validate_values(&related.note, &format!("{path}/note"), depth)?;
    validate_values(&related.identifier, &format!("{path}/identifier"), depth)?;
    validate_values(&related.subject, &format!("{path}/subject"), depth)?;
    for (i, contributor) in related.contributor.iter().enumerate() {
        validate_contributor(contributor, &format!("{path}/contributor/{i}"), depth)?;
    }
    for (i, event) in related.event.iter().enumerate() {
        validate_event(event, &format!("{path}/event/{i}"), depth)?;
    }
    for (i, nested) in related.related_resource.iter().enumerate() {
        validate_related(nested, &format!("{path}/relatedResource/{i}"), depth + 1)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titled(title: &str) -> Description {
        Description {
            title: vec![DescriptiveValue::of(title)],
            ..Default::default()
        }
    }

    #[test]
    fn test_title_required() {
        assert!(validate_description(&Description::default(), "/description", true).is_err());
        assert!(validate_description(&Description::default(), "/description", false).is_ok());
        assert!(validate_description(&titled("Hamlet"), "/description", true).is_ok());
    }

    #[test]
    fn test_value_and_structured_value_conflict() {
        let mut description = titled("Hamlet");
        description.subject.push(DescriptiveValue {
            value: Some("Cats".into()),
            structured_value: vec![DescriptiveValue::of("Dogs")],
            ..Default::default()
        });
        let err = validate_description(&description, "/description", true).unwrap_err();
        match err {
            MappingError::SchemaViolation { path, .. } => assert_eq!(path, "/description/subject/0"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_depth_guard() {
        let mut node = DescriptiveValue::of("leaf");
        for _ in 0..(MAX_DEPTH + 2) {
            node = DescriptiveValue {
                structured_value: vec![node],
                ..Default::default()
            };
        }
        let mut description = titled("Deep");
        description.form.push(node);
        assert!(validate_description(&description, "/description", true).is_err());
    }
}
