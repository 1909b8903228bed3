//! rightsMetadata and embargoMetadata writers.
//!
//! The inverse of the grant table in the rights reader: each view/download
//! pair is spelled as the smallest set of grants that reads back to it.
//!
//! ```text
//! view / download                 grants
//! world / world                 → world
//! world / stanford              → world(no-download) + stanford
//! world / location-based        → world(no-download) + location
//! world / none                  → world(no-download)
//! stanford / none (+cdl)        → cdl(stanford, no-download)
//! stanford / stanford           → stanford
//! stanford / location-based     → stanford(no-download) + location
//! stanford / none               → stanford(no-download)
//! location-based / location     → location
//! location-based / none         → location(no-download)
//! citation-only, dark           → none
//! ```

use indexmap::IndexMap;

use crate::base::{XmlElement, XmlNode};
use crate::cocina::{Access, Download, Embargo, FileAccess, Rights, View};

const NO_DOWNLOAD: &str = "no-download";
const STANFORD_GROUP: &str = "stanford";

/// The machine grants for one scope.
fn grants(rights: Rights) -> Vec<XmlElement> {
    let location = |no_download: bool| {
        rights.location.map(|location| {
            let element = XmlElement::text_element("location", location.code());
            if no_download {
                element.with_attr("rule", NO_DOWNLOAD)
            } else {
                element
            }
        })
    };
    let stanford = |no_download: bool| {
        let group = XmlElement::text_element("group", STANFORD_GROUP);
        if no_download {
            group.with_attr("rule", NO_DOWNLOAD)
        } else {
            group
        }
    };
    let world_no_download = || XmlElement::new("world").with_attr("rule", NO_DOWNLOAD);

    if rights.controlled_digital_lending {
        return vec![XmlElement::new("cdl").with_child(stanford(true))];
    }
    match (rights.view, rights.download) {
        (View::World, Download::World) => vec![XmlElement::new("world")],
        (View::World, Download::Stanford) => vec![world_no_download(), stanford(false)],
        (View::World, Download::LocationBased) => {
            std::iter::once(world_no_download()).chain(location(false)).collect()
        }
        (View::World, Download::None) => vec![world_no_download()],
        (View::Stanford, Download::Stanford | Download::World) => vec![stanford(false)],
        (View::Stanford, Download::LocationBased) => {
            std::iter::once(stanford(true)).chain(location(false)).collect()
        }
        (View::Stanford, Download::None) => vec![stanford(true)],
        (View::LocationBased, Download::LocationBased) => location(false).into_iter().collect(),
        (View::LocationBased, _) => location(true).into_iter().collect(),
        (View::CitationOnly | View::Dark, _) => vec![XmlElement::new("none")],
    }
}

fn block(kind: &str, grants: Vec<XmlElement>) -> XmlElement {
    let mut machine = XmlElement::new("machine");
    for grant in grants {
        machine.push_child(grant);
    }
    XmlElement::new("access").with_attr("type", kind).with_child(machine)
}

fn read_block(rights: Rights) -> XmlElement {
    block("read", grants(rights))
}

// ============================================================================
// RIGHTS METADATA
// ============================================================================

/// Object access plus one read block per file whose access is given.
pub(super) fn write(access: &Access, file_access: &IndexMap<String, FileAccess>) -> XmlElement {
    let rights = access.rights();
    let discover = if rights.view == View::Dark { "none" } else { "world" };
    let mut element = XmlElement::new("rightsMetadata")
        .with_child(block("discover", vec![XmlElement::new(discover)]))
        .with_child(read_block(rights));

    for (filename, file) in file_access {
        let mut file_block = read_block(file.rights());
        let file = XmlElement::text_element("file", filename.clone());
        file_block.children.insert(0, XmlNode::Element(file));
        element.push_child(file_block);
    }

    let mut use_block = XmlElement::new("use");
    if let Some(statement) = &access.use_and_reproduction_statement {
        use_block.push_child(
            XmlElement::text_element("human", statement.clone()).with_attr("type", "useAndReproduction"),
        );
    }
    if let Some(license) = &access.license {
        use_block.push_child(XmlElement::text_element("license", license.clone()));
    }
    if use_block.has_element_children() {
        element.push_child(use_block);
    }
    if let Some(copyright) = &access.copyright {
        element.push_child(
            XmlElement::new("copyright").with_child(XmlElement::text_element("human", copyright.clone())),
        );
    }
    element
}

// ============================================================================
// EMBARGO METADATA
// ============================================================================

/// An absent embargo is an empty datastream. Release to citation-only or
/// dark carries no release access.
pub(super) fn write_embargo(embargo: Option<&Embargo>) -> XmlElement {
    let mut element = XmlElement::new("embargoMetadata");
    let Some(embargo) = embargo else {
        return element;
    };
    element.push_child(XmlElement::text_element("status", "embargoed"));
    element.push_child(XmlElement::text_element("releaseDate", embargo.release_date.clone()));
    let rights = embargo.rights();
    if !matches!(rights.view, View::CitationOnly | View::Dark) {
        element.push_child(XmlElement::new("releaseAccess").with_child(read_block(rights)));
    }
    if let Some(statement) = &embargo.use_and_reproduction_statement {
        element.push_child(XmlElement::text_element("useAndReproductionStatement", statement.clone()));
    }
    element
}
