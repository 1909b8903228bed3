//! MODS term tables.
//!
//! Every table is `(mods term, canonical term)`. The reader looks up the left
//! column, the writer the right one, so the two directions cannot drift apart.

use crate::base::XmlElement;

pub const MODS_NS: &str = "http://www.loc.gov/mods/v3";
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
pub const MODS_VERSION: &str = "3.7";
pub const MODS_SCHEMA_LOCATION: &str =
    "http://www.loc.gov/mods/v3 http://www.loc.gov/standards/mods/v3/mods-3-7.xsd";

/// Deepest `relatedItem` nesting followed by the mappers.
pub const MAX_RELATED_DEPTH: usize = 16;

/// Children of `mods` and `relatedItem` with a canonical counterpart. The
/// reader drops anything else and normalization removes it too.
pub const MAPPED_ELEMENTS: &[&str] = &[
    "titleInfo",
    "name",
    "typeOfResource",
    "genre",
    "originInfo",
    "language",
    "physicalDescription",
    "abstract",
    "tableOfContents",
    "targetAudience",
    "note",
    "subject",
    "classification",
    "identifier",
    "location",
    "part",
    "relatedItem",
    "accessCondition",
    "recordInfo",
];

pub type Table = &'static [(&'static str, &'static str)];

/// `titleInfo` children.
pub const TITLE_PARTS: Table = &[
    ("nonSort", "nonsorting characters"),
    ("title", "main title"),
    ("subTitle", "subtitle"),
    ("partName", "part name"),
    ("partNumber", "part number"),
];

/// `namePart@type` values.
pub const NAME_PARTS: Table = &[
    ("given", "forename"),
    ("family", "surname"),
    ("date", "life dates"),
    ("termsOfAddress", "term of address"),
];

/// `name@type` values.
pub const NAME_TYPES: Table = &[
    ("personal", "person"),
    ("corporate", "organization"),
    ("family", "family"),
    ("conference", "conference"),
];

/// `originInfo` date elements and the date type each carries.
pub const DATE_ELEMENTS: Table = &[
    ("dateIssued", "publication"),
    ("dateCreated", "creation"),
    ("dateCaptured", "capture"),
    ("dateValid", "validity"),
    ("dateModified", "modification"),
    ("copyrightDate", "copyright"),
];

/// `originInfo` notes.
pub const EVENT_NOTES: Table = &[
    ("edition", "edition"),
    ("issuance", "issuance"),
    ("frequency", "frequency"),
];

/// `relatedItem@type` values.
pub const RELATED_TYPES: Table = &[
    ("host", "part of"),
    ("constituent", "has part"),
    ("series", "in series"),
    ("otherFormat", "has other format"),
    ("otherVersion", "has version"),
    ("preceding", "preceded by"),
    ("succeeding", "succeeded by"),
    ("original", "has original version"),
    ("isReferencedBy", "referenced by"),
    ("references", "references"),
    ("reviewOf", "reviews"),
];

/// Canonical relation type for a `relatedItem` carrying only `otherType`.
pub const RELATED_TO: &str = "related to";

/// Note type that carries `relatedItem@otherType`.
pub const OTHER_RELATION_TYPE: &str = "other relation type";

/// `subject` children holding a single term.
pub const SUBJECT_TERMS: Table = &[
    ("topic", "topic"),
    ("geographic", "place"),
    ("temporal", "time"),
    ("genre", "genre"),
    ("occupation", "occupation"),
];

/// Subject type of a `classification`.
pub const CLASSIFICATION: &str = "classification";

/// Subject type of `cartographics`.
pub const CARTOGRAPHICS: &str = "cartographics";

/// `hierarchicalGeographic` children.
pub const HIERARCHICAL_PARTS: Table = &[
    ("continent", "continent"),
    ("country", "country"),
    ("province", "province"),
    ("region", "region"),
    ("state", "state"),
    ("territory", "territory"),
    ("county", "county"),
    ("city", "city"),
    ("citySection", "city section"),
    ("island", "island"),
    ("area", "area"),
    ("extraterrestrialArea", "extraterrestrial area"),
];

/// `cartographics` children.
pub const CARTOGRAPHIC_PARTS: Table = &[
    ("scale", "map scale"),
    ("projection", "map projection"),
    ("coordinates", "map coordinates"),
];

/// `physicalDescription` children.
pub const PHYSICAL_PARTS: Table = &[
    ("form", "form"),
    ("extent", "extent"),
    ("reformattingQuality", "reformatting quality"),
    ("internetMediaType", "media type"),
    ("digitalOrigin", "digital origin"),
    ("note", "note"),
];

/// Legacy `accessCondition@type` spellings and their current form.
pub const ACCESS_CONDITION_TYPES: Table = &[
    ("useAndReproduction", "use and reproduction"),
    ("restrictionOnAccess", "restriction on access"),
];

/// `url@usage` of an object's own purl.
pub const PRIMARY_DISPLAY: &str = "primary display";

/// `physicalLocation@type` read as an access contact.
pub const REPOSITORY: &str = "repository";

/// Physical location type carrying `shelfLocator`.
pub const SHELF_LOCATOR: &str = "shelf locator";

/// `recordInfo` date elements and the event type each becomes.
pub const RECORD_DATES: Table = &[
    ("recordCreationDate", "creation"),
    ("recordChangeDate", "modification"),
];

/// Role of the contributor read from `recordContentSource`.
pub const CATALOGING_AGENCY: &str = "original cataloging agency";

/// Note type carrying `recordOrigin`.
pub const RECORD_ORIGIN: &str = "record origin";

/// Source value marking forms that came from `typeOfResource`.
pub const MODS_RESOURCE_TYPES: &str = "MODS resource types";

/// `typeOfResource` flags that are forms of their own.
pub const RESOURCE_TYPE_FLAGS: [&str; 2] = ["manuscript", "collection"];

/// Note types written as `abstract`.
pub const ABSTRACT_TYPES: &[&str] = &["abstract", "summary", "scope and content"];

/// Note type carrying a `part`.
pub const PART_NOTE: &str = "part";

/// `part` attributes.
pub const PART_ATTRIBUTES: &[&str] = &["type", "order"];

/// Structured part type carrying an element's own text.
pub const PART_TEXT: &str = "value";

/// A `part` child: its name, its attributes and its text-only children.
pub type PartElement = (&'static str, &'static [&'static str], &'static [&'static str]);

/// `part` children. `date` and `text` carry text of their own.
pub const PART_ELEMENTS: &[PartElement] = &[
    ("detail", &["type", "level"], &["number", "caption", "title"]),
    ("extent", &["unit"], &["start", "end", "total", "list"]),
    ("date", &["encoding", "point", "qualifier"], &[]),
    ("text", &["type"], &[]),
];

pub fn part_element(name: &str) -> Option<&'static PartElement> {
    PART_ELEMENTS.iter().find(|(element, ..)| *element == name)
}

/// Canonical term for a MODS term.
pub fn to_canonical(table: Table, mods: &str) -> Option<&'static str> {
    table.iter().find(|(m, _)| *m == mods).map(|(_, c)| *c)
}

/// MODS term for a canonical term.
pub fn to_mods(table: Table, canonical: &str) -> Option<&'static str> {
    table.iter().find(|(_, c)| *c == canonical).map(|(m, _)| *m)
}

/// Event type implied by an `originInfo`'s children, used when `eventType`
/// is missing. The first date element decides; a bare publisher or place
/// implies publication.
pub fn infer_event_type(origin_info: &XmlElement) -> Option<&'static str> {
    for child in origin_info.elements() {
        if let Some(kind) = to_canonical(DATE_ELEMENTS, child.local_name()) {
            return Some(kind);
        }
    }
    let has_publication_parts = origin_info
        .elements()
        .any(|e| matches!(e.local_name(), "publisher" | "place"));
    has_publication_parts.then_some("publication")
}
