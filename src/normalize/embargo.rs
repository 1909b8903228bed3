//! embargoMetadata rules.

use super::rights::{merge_object_read_blocks, split_file_read_blocks};
use super::{Context, Rule, remove_empty_where, strip_presentation_attributes, trim_text};
use crate::base::{XmlElement, XmlNode};

pub(super) const RULES: &[(&str, Rule)] = &[
    ("strip presentation attributes", strip_presentation_attributes),
    ("trim text", trim_text),
    ("released embargo", released_embargo),
    ("drop release tracking", drop_release_tracking),
    ("release access blocks", release_access_blocks),
    ("remove empty elements", remove_empty_embargo),
];

/// Elements that track the release job rather than the embargo itself.
const RELEASE_TRACKING: [&str; 2] = ["twentyPctVisibilityStatus", "twentyPctVisibilityReleaseDate"];

/// A released embargo carries no information.
fn released_embargo(embargo: &mut XmlElement, _: &Context<'_>) {
    let released = embargo
        .child_text("status")
        .is_some_and(|status| status.eq_ignore_ascii_case("released"));
    if released {
        embargo.children.clear();
    }
}

fn drop_release_tracking(embargo: &mut XmlElement, _: &Context<'_>) {
    embargo.retain_elements(|e| !RELEASE_TRACKING.contains(&e.local_name()));
}

/// Release access follows the rights rules; discover is always world after release.
fn release_access_blocks(embargo: &mut XmlElement, context: &Context<'_>) {
    for release in embargo
        .elements_mut()
        .filter(|e| e.local_name() == "releaseAccess")
    {
        release.retain_elements(|e| {
            !(e.local_name() == "access" && e.attr("type") == Some("discover"))
        });
        release.retain_elements(|e| !grants_nothing(e));
        merge_object_read_blocks(release, context);
        split_file_read_blocks(release, context);
        super::walk_mut(release, &mut |e| {
            if e.local_name() == "group" {
                let lower = e.text().to_lowercase();
                if lower != e.text() {
                    e.children = vec![XmlNode::Text(lower)];
                }
            }
        });
    }
}

/// An object-level read block granting only `none`; the same as no release access.
fn grants_nothing(block: &XmlElement) -> bool {
    block.local_name() == "access"
        && block.attr("type") == Some("read")
        && block.child("file").is_none()
        && block
            .children_named("machine")
            .flat_map(XmlElement::elements)
            .all(|grant| grant.local_name() == "none")
}

fn remove_empty_embargo(embargo: &mut XmlElement, _: &Context<'_>) {
    remove_empty_where(embargo, &|e| matches!(e.local_name(), "world" | "none"));
}

#[cfg(test)]
mod tests {
    use super::super::normalize;
    use crate::base::XmlElement;

    #[test]
    fn test_released_embargo_is_empty() {
        let doc = XmlElement::parse(
            "<embargoMetadata><status>released</status><releaseDate>2020-01-01T00:00:00Z</releaseDate></embargoMetadata>",
        )
        .unwrap();
        assert_eq!(normalize(&doc, "bc123df4567"), XmlElement::new("embargoMetadata"));
    }

    #[test]
    fn test_release_to_nobody_dropped() {
        let doc = XmlElement::parse(
            r#"<embargoMetadata><status>embargoed</status><releaseDate>2029-02-28</releaseDate>
               <releaseAccess><access type="read"><machine><none/></machine></access></releaseAccess></embargoMetadata>"#,
        )
        .unwrap();
        let normalized = normalize(&doc, "bc123df4567");
        assert!(normalized.child("releaseAccess").is_none());
        assert_eq!(normalized.child_text("releaseDate").as_deref(), Some("2029-02-28"));
    }

    #[test]
    fn test_release_access_discover_dropped() {
        let doc = XmlElement::parse(
            r#"<embargoMetadata>
                <status>embargoed</status>
                <releaseDate>2029-02-28T00:00:00Z</releaseDate>
                <twentyPctVisibilityStatus/>
                <releaseAccess>
                    <access type="discover"><machine><world/></machine></access>
                    <access type="read"><machine><world/></machine></access>
                </releaseAccess>
            </embargoMetadata>"#,
        )
        .unwrap();
        let normalized = normalize(&doc, "bc123df4567");
        assert!(normalized.child("twentyPctVisibilityStatus").is_none());
        let release = normalized.child("releaseAccess").unwrap();
        assert_eq!(release.elements().count(), 1);
        assert!(
            release
                .child("access")
                .and_then(|a| a.child("machine"))
                .and_then(|m| m.child("world"))
                .is_some()
        );
    }
}
