//! rightsMetadata and embargoMetadata readers.
//!
//! Legacy access is a set of grants (`world`, `group`, `location`, `cdl`,
//! `none`) across read blocks, each optionally restricted by a
//! `rule="no-download"`. [`derive_rights`] collapses the grants of one scope
//! into a single view/download pair.
//!
//! ```text
//! grants                                   view / download
//! cdl                                    → stanford / none (+cdl)
//! world                                  → world / world
//! world(no-download) + stanford          → world / stanford
//! world(no-download) + location          → world / location-based
//! world(no-download)                     → world / none
//! stanford                               → stanford / stanford
//! stanford(no-download) [+ location]     → stanford / none | location-based
//! location                               → location-based / location-based
//! location(no-download)                  → location-based / none
//! nothing, discoverable                  → citation-only / none
//! nothing                                → dark / none
//! ```

use indexmap::IndexMap;
use tracing::warn;

use crate::base::XmlElement;
use crate::cocina::{Access, Download, Embargo, FileAccess, Location, Rights, RightsFragment, View};
use crate::error::{MappingError, Result};
use crate::legacy::Datastream;

const NO_DOWNLOAD: &str = "no-download";
const STANFORD_GROUP: &str = "stanford";

/// One grant found in a machine block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Grant {
    World { no_download: bool },
    Stanford { no_download: bool },
    Location { location: Location, no_download: bool },
    ControlledDigitalLending,
    None,
}

/// Grants held by the machine blocks of one scope.
fn read_grants<'a>(
    machines: impl Iterator<Item = &'a XmlElement>,
    datastream: Datastream,
) -> Result<Vec<Grant>> {
    let mut grants = Vec::new();
    for machine in machines {
        for grant in machine.elements() {
            let no_download = grant.attr("rule") == Some(NO_DOWNLOAD);
            match grant.local_name() {
                "world" => grants.push(Grant::World { no_download }),
                "group" if grant.text().eq_ignore_ascii_case(STANFORD_GROUP) => {
                    grants.push(Grant::Stanford { no_download })
                }
                "group" => warn!(group = %grant.text(), "unsupported read group ignored"),
                "location" => {
                    let code = grant.text();
                    let location = Location::from_code(&code).ok_or_else(|| {
                        MappingError::unmappable(
                            datastream.name(),
                            format!("unknown location '{code}'"),
                        )
                    })?;
                    grants.push(Grant::Location {
                        location,
                        no_download,
                    });
                }
                "cdl" => grants.push(Grant::ControlledDigitalLending),
                "none" => grants.push(Grant::None),
                other => warn!(element = other, "unmapped access grant ignored"),
            }
        }
    }
    Ok(grants)
}

/// Collapse one scope's grants into rights.
pub(crate) fn derive_rights(discoverable: bool, grants: &[Grant]) -> Rights {
    let has = |wanted: fn(&Grant) -> bool| grants.iter().any(wanted);
    let downloadable_location = grants.iter().find_map(|g| match g {
        Grant::Location {
            location,
            no_download: false,
        } => Some(*location),
        _ => None,
    });
    let any_location = grants.iter().find_map(|g| match g {
        Grant::Location { location, .. } => Some(*location),
        _ => None,
    });
    let stanford_downloads = has(|g| matches!(g, Grant::Stanford { no_download: false }));

    if has(|g| matches!(g, Grant::ControlledDigitalLending)) {
        let mut rights = Rights::new(View::Stanford, Download::None);
        rights.controlled_digital_lending = true;
        return rights;
    }
    if has(|g| matches!(g, Grant::World { no_download: false })) {
        return Rights::new(View::World, Download::World);
    }
    if has(|g| matches!(g, Grant::World { no_download: true })) {
        if stanford_downloads {
            return Rights::new(View::World, Download::Stanford);
        }
        if let Some(location) = downloadable_location {
            return Rights::new(View::World, Download::LocationBased).at(location);
        }
        return Rights::new(View::World, Download::None);
    }
    if stanford_downloads {
        return Rights::new(View::Stanford, Download::Stanford);
    }
    if has(|g| matches!(g, Grant::Stanford { no_download: true })) {
        return match downloadable_location {
            Some(location) => Rights::new(View::Stanford, Download::LocationBased).at(location),
            None => Rights::new(View::Stanford, Download::None),
        };
    }
    if let Some(location) = any_location {
        let download = if downloadable_location.is_some() {
            Download::LocationBased
        } else {
            Download::None
        };
        return Rights::new(View::LocationBased, download).at(location);
    }
    if discoverable {
        Rights::new(View::CitationOnly, Download::None)
    } else {
        Rights::new(View::Dark, Download::None)
    }
}

fn blocks<'a>(parent: &'a XmlElement, kind: &'a str) -> impl Iterator<Item = &'a XmlElement> {
    parent
        .children_named("access")
        .filter(move |block| block.attr("type") == Some(kind))
}

fn object_machines(parent: &XmlElement) -> impl Iterator<Item = &XmlElement> {
    blocks(parent, "read")
        .filter(|block| block.child("file").is_none())
        .flat_map(|block| block.children_named("machine"))
}

// ============================================================================
// RIGHTS METADATA
// ============================================================================

pub(super) fn read(rights: &XmlElement) -> Result<RightsFragment> {
    let datastream = Datastream::Rights;
    let discoverable = blocks(rights, "discover")
        .flat_map(|block| block.children_named("machine"))
        .any(|machine| machine.child("world").is_some());
    let grants = read_grants(object_machines(rights), datastream)?;

    let mut access = Access::default();
    access.set_rights(derive_rights(discoverable, &grants));
    read_use(rights, &mut access);

    let mut file_access = IndexMap::new();
    for block in blocks(rights, "read").filter(|block| block.child("file").is_some()) {
        let grants = read_grants(block.children_named("machine"), datastream)?;
        let rights = FileAccess::from(derive_rights(false, &grants));
        for file in block.children_named("file") {
            file_access.insert(file.text(), rights);
        }
    }

    Ok(RightsFragment {
        access,
        file_access,
    })
}

fn read_use(rights: &XmlElement, access: &mut Access) {
    for block in rights.children_named("use") {
        for child in block.elements() {
            match (child.local_name(), child.attr("type")) {
                ("human", Some("useAndReproduction")) => {
                    access.use_and_reproduction_statement = Some(child.text())
                }
                ("license", _) => access.license = Some(child.text()),
                (other, _) => warn!(element = other, "unmapped use statement ignored"),
            }
        }
    }
    for block in rights.children_named("copyright") {
        if let Some(statement) = block.child_text("human") {
            access.copyright = Some(statement);
        }
    }
}

// ============================================================================
// EMBARGO METADATA
// ============================================================================

pub(super) fn read_embargo(embargo: &XmlElement) -> Result<Option<Embargo>> {
    let released = embargo
        .child_text("status")
        .is_some_and(|status| status.eq_ignore_ascii_case("released"));
    if embargo.is_empty() || released {
        return Ok(None);
    }
    let release_date = embargo.child_text("releaseDate").ok_or_else(|| {
        MappingError::unmappable(Datastream::Embargo.name(), "releaseDate is missing")
    })?;

    let grants = match embargo.child("releaseAccess") {
        Some(release) => read_grants(object_machines(release), Datastream::Embargo)?,
        None => Vec::new(),
    };
    let rights = derive_rights(true, &grants);
    Ok(Some(Embargo {
        release_date,
        view: rights.view,
        download: rights.download,
        location: rights.location,
        controlled_digital_lending: rights.controlled_digital_lending,
        use_and_reproduction_statement: embargo.child_text("useAndReproductionStatement"),
    }))
}
