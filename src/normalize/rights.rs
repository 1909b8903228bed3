//! rightsMetadata rules (also applied inside embargo release access).

use super::{Context, Rule, remove_empty_where, strip_presentation_attributes, trim_text};
use crate::base::{XmlElement, XmlNode};

pub(super) const RULES: &[(&str, Rule)] = &[
    ("strip presentation attributes", strip_presentation_attributes),
    ("trim text", trim_text),
    ("drop edit access", drop_edit_access),
    ("drop embargo release date", drop_embargo_release_date),
    ("group names", group_names),
    ("merge object read blocks", merge_object_read_blocks),
    ("split file read blocks", split_file_read_blocks),
    ("implied read", implied_read),
    ("implied discover", implied_discover),
    ("legacy licenses", legacy_licenses),
    ("remove empty elements", remove_empty_rights),
];

const LEGACY_LICENSE_SCHEMES: [&str; 2] = ["creativeCommons", "openDataCommons"];

fn drop_edit_access(rights: &mut XmlElement, _: &Context<'_>) {
    rights.retain_elements(|e| !(e.local_name() == "access" && e.attr("type") == Some("edit")));
}

/// Embargo dates live in embargoMetadata.
fn drop_embargo_release_date(rights: &mut XmlElement, _: &Context<'_>) {
    for access in rights.elements_mut() {
        for machine in access.elements_mut() {
            machine.retain_elements(|e| e.local_name() != "embargoReleaseDate");
        }
    }
}

fn group_names(rights: &mut XmlElement, _: &Context<'_>) {
    super::walk_mut(rights, &mut |e| {
        if e.local_name() == "group" {
            let text = e.text();
            let lower = text.to_lowercase();
            if lower != text {
                e.children = vec![XmlNode::Text(lower)];
            }
        }
    });
}

fn is_read_block(e: &XmlElement) -> bool {
    e.local_name() == "access" && e.attr("type") == Some("read")
}

fn is_file_block(e: &XmlElement) -> bool {
    is_read_block(e) && e.child("file").is_some()
}

/// All object-level read grants go in one block.
pub(super) fn merge_object_read_blocks(parent: &mut XmlElement, _: &Context<'_>) {
    let object_blocks = parent
        .elements()
        .filter(|e| is_read_block(e) && !is_file_block(e))
        .count();
    if object_blocks < 2 {
        return;
    }

    let mut merged_machine = XmlElement::new("machine");
    let mut first_attributes = None;
    let children = std::mem::take(&mut parent.children);
    let mut insert_at = None;
    for node in children {
        match node {
            XmlNode::Element(block) if is_read_block(&block) && !is_file_block(&block) => {
                if first_attributes.is_none() {
                    first_attributes = Some(block.attributes.clone());
                    insert_at = Some(parent.children.len());
                }
                for machine in block.children_named("machine") {
                    for grant in machine.elements() {
                        merged_machine.push_child(grant.clone());
                    }
                }
            }
            other => parent.children.push(other),
        }
    }
    let mut merged = XmlElement::new("access");
    merged.attributes = first_attributes.unwrap_or_default();
    merged.push_child(merged_machine);
    let index = insert_at.unwrap_or(parent.children.len());
    parent.children.insert(index, XmlNode::Element(merged));
}

/// One read block per overridden file.
pub(super) fn split_file_read_blocks(parent: &mut XmlElement, _: &Context<'_>) {
    let needs_split = parent
        .elements()
        .any(|e| is_file_block(e) && e.children_named("file").count() > 1);
    if !needs_split {
        return;
    }
    let children = std::mem::take(&mut parent.children);
    for node in children {
        match node {
            XmlNode::Element(block) if is_file_block(&block) && block.children_named("file").count() > 1 => {
                for file in block.children_named("file") {
                    let mut single = XmlElement::new(block.name.clone());
                    single.attributes = block.attributes.clone();
                    single.push_child(file.clone());
                    for other in block.elements().filter(|e| e.local_name() != "file") {
                        single.push_child(other.clone());
                    }
                    parent.push_child(single);
                }
            }
            other => parent.children.push(other),
        }
    }
}

/// No object read block reads the same as one granting `none`.
fn implied_read(rights: &mut XmlElement, _: &Context<'_>) {
    if rights.elements().any(|e| is_read_block(e) && !is_file_block(e)) {
        return;
    }
    let read = XmlElement::new("access")
        .with_attr("type", "read")
        .with_child(XmlElement::new("machine").with_child(XmlElement::new("none")));
    let index = rights
        .children
        .iter()
        .position(|node| matches!(node, XmlNode::Element(e) if e.local_name() == "access"))
        .unwrap_or(rights.children.len());
    rights.children.insert(index, XmlNode::Element(read));
}

/// An object readable by someone is discoverable by the world; one readable
/// by nobody is discoverable by nobody.
fn implied_discover(rights: &mut XmlElement, _: &Context<'_>) {
    let has_discover = rights
        .elements()
        .any(|e| e.local_name() == "access" && e.attr("type") == Some("discover"));
    if has_discover {
        return;
    }
    let grants_read = rights
        .elements()
        .filter(|e| is_read_block(e) && !is_file_block(e))
        .flat_map(|block| block.children_named("machine"))
        .flat_map(|machine| machine.elements())
        .any(|grant| grant.local_name() != "none");
    let grant = if grants_read { "world" } else { "none" };
    let discover = XmlElement::new("access")
        .with_attr("type", "discover")
        .with_child(XmlElement::new("machine").with_child(XmlElement::new(grant)));
    rights.children.insert(0, XmlNode::Element(discover));
}

/// Legacy machine-readable license codes become license URIs.
fn legacy_licenses(rights: &mut XmlElement, context: &Context<'_>) {
    for block in rights.elements_mut().filter(|e| e.local_name() == "use") {
        let converted = block
            .elements()
            .filter(|e| e.local_name() == "machine")
            .find_map(|machine| {
                let scheme = machine.attr("type")?;
                context
                    .vocab
                    .legacy_license_uri(scheme, &machine.text())
                    .map(str::to_string)
            });
        let is_legacy = |e: &XmlElement| {
            matches!(e.local_name(), "machine" | "human")
                && e.attr("type").is_some_and(|t| LEGACY_LICENSE_SCHEMES.contains(&t))
        };
        let had_legacy = block.elements().any(is_legacy);
        if !had_legacy {
            continue;
        }
        block.retain_elements(|e| !is_legacy(e));
        if let Some(uri) = converted {
            if block.child("license").is_none() {
                block.push_child(XmlElement::text_element("license", uri));
            }
        }
    }
}

/// `world` and `none` grants are empty by nature.
fn remove_empty_rights(rights: &mut XmlElement, _: &Context<'_>) {
    remove_empty_where(rights, &|e| matches!(e.local_name(), "world" | "none"));
}
