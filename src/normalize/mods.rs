//! MODS rules.

use rustc_hash::{FxHashMap, FxHashSet};

use super::{
    Context, Rule, remove_empty_elements, strip_namespace_declarations,
    strip_presentation_attributes, trim_text, walk_mut,
};
use crate::base::{XmlElement, XmlNode};
use crate::legacy::mods::{
    ACCESS_CONDITION_TYPES, MAPPED_ELEMENTS, MAX_RELATED_DEPTH, MODS_VERSION, NAME_TYPES,
    PART_ATTRIBUTES, infer_event_type, part_element, to_canonical,
};

pub(super) const RULES: &[(&str, Rule)] = &[
    ("strip mods prefix", strip_mods_prefix),
    ("strip namespace declarations", strip_namespace_declarations),
    ("strip presentation attributes", strip_presentation_attributes),
    ("trim text", trim_text),
    ("unmapped elements", unmapped_elements),
    ("part shape", part_shape),
    ("schema version", schema_version),
    ("canonical enumerations", canonical_enumerations),
    ("single primary", single_primary),
    ("orphan group attributes", orphan_group_attributes),
    ("split locations", split_locations),
    ("purl urls", purl_urls),
    ("default event type", default_event_type),
    ("term authority", term_authority),
    ("subject authority", subject_authority),
    ("remove empty elements", remove_empty_elements),
    ("renumber groups", renumber_groups),
];

const GROUP_ATTRIBUTES: [&str; 2] = ["altRepGroup", "nameTitleGroup"];
const TITLE_TYPES: [&str; 4] = ["alternative", "abbreviated", "translated", "uniform"];
const DATE_ENCODINGS: [&str; 5] = ["w3cdtf", "edtf", "iso8601", "marc", "temper"];
const AUTHORITY_ATTRIBUTES: [&str; 3] = ["authority", "authorityURI", "valueURI"];
const TERM_ELEMENTS: [&str; 4] = ["roleTerm", "languageTerm", "scriptTerm", "placeTerm"];

fn strip_mods_prefix(element: &mut XmlElement, _: &Context<'_>) {
    walk_mut(element, &mut |e| {
        if let Some(local) = e.name.strip_prefix("mods:") {
            e.name = local.to_string();
        }
    });
}

/// Keep the children of `mods` and of each `relatedItem` that have a
/// canonical counterpart, and cut `relatedItem` nesting where the mappers
/// stop following it.
fn unmapped_elements(mods: &mut XmlElement, _: &Context<'_>) {
    retain_mapped(mods, 0);
}

fn retain_mapped(body: &mut XmlElement, depth: usize) {
    body.retain_elements(|child| match child.local_name() {
        "relatedItem" => depth < MAX_RELATED_DEPTH,
        name => MAPPED_ELEMENTS.contains(&name),
    });
    for item in body.elements_mut().filter(|e| e.local_name() == "relatedItem") {
        retain_mapped(item, depth + 1);
    }
}

/// A `part` keeps the attributes and children its note carries; text-only
/// children lose their attributes.
fn part_shape(mods: &mut XmlElement, _: &Context<'_>) {
    walk_mut(mods, &mut |parent| {
        if !matches!(parent.local_name(), "mods" | "relatedItem") {
            return;
        }
        for part in parent.elements_mut().filter(|e| e.local_name() == "part") {
            part.attributes.retain(|key, _| PART_ATTRIBUTES.contains(&key.as_str()));
            part.children.retain(|node| {
                matches!(node, XmlNode::Element(e) if part_element(e.local_name()).is_some())
            });
            for component in part.elements_mut() {
                let Some((_, attributes, leaves)) = part_element(component.local_name()) else {
                    continue;
                };
                component.attributes.retain(|key, _| attributes.contains(&key.as_str()));
                if leaves.is_empty() {
                    component.children.retain(|node| matches!(node, XmlNode::Text(_)));
                    continue;
                }
                component.children.retain(|node| {
                    matches!(node, XmlNode::Element(e) if leaves.contains(&e.local_name()))
                });
                for leaf in component.elements_mut() {
                    leaf.attributes.clear();
                    leaf.children.retain(|node| matches!(node, XmlNode::Text(_)));
                }
            }
        }
    });
}

fn schema_version(mods: &mut XmlElement, _: &Context<'_>) {
    if mods.attr("version") != Some(MODS_VERSION) {
        mods.set_attr("version", MODS_VERSION);
    }
}

/// Fix known enumerations written with the wrong case; unknown values stay.
fn canonical_enumerations(mods: &mut XmlElement, context: &Context<'_>) {
    walk_mut(mods, &mut |e| {
        let name = e.local_name().to_string();
        match name.as_str() {
            "identifier" | "nameIdentifier" => {
                if let Some(kind) = e.attr("type") {
                    if let Some(canonical) = context.vocab.canonical_mods_identifier_type(kind) {
                        if canonical != kind {
                            let canonical = canonical.to_string();
                            e.set_attr("type", canonical);
                        }
                    }
                }
            }
            "name" => lowercase_if_known(e, "type", |v| to_canonical(NAME_TYPES, v).is_some()),
            "titleInfo" => lowercase_if_known(e, "type", |v| TITLE_TYPES.contains(&v)),
            "accessCondition" => {
                if let Some(kind) = e.attr("type") {
                    if let Some(canonical) = to_canonical(ACCESS_CONDITION_TYPES, kind) {
                        e.set_attr("type", canonical);
                    }
                }
            }
            _ => {}
        }
        lowercase_if_known(e, "encoding", |v| DATE_ENCODINGS.contains(&v));
        lowercase_if_known(e, "usage", |v| v == "primary");
    });
}

fn lowercase_if_known(element: &mut XmlElement, attribute: &str, known: impl Fn(&str) -> bool) {
    let Some(value) = element.attr(attribute) else {
        return;
    };
    let lower = value.to_lowercase();
    if lower != value && known(&lower) {
        element.set_attr(attribute, lower);
    }
}

/// Only the first `usage="primary"` among same-named siblings counts.
fn single_primary(mods: &mut XmlElement, _: &Context<'_>) {
    walk_mut(mods, &mut |parent| {
        let mut seen: FxHashSet<String> = FxHashSet::default();
        for child in parent.elements_mut() {
            if child.attr("usage") == Some("primary")
                && !seen.insert(child.local_name().to_string())
            {
                child.remove_attr("usage");
            }
        }
    });
}

/// Drop grouping attributes whose counterpart is missing among the siblings.
fn orphan_group_attributes(mods: &mut XmlElement, _: &Context<'_>) {
    walk_mut(mods, &mut |parent| {
        let mut alt_counts: FxHashMap<String, usize> = FxHashMap::default();
        let mut title_groups: FxHashSet<String> = FxHashSet::default();
        let mut name_groups: FxHashSet<String> = FxHashSet::default();
        for child in parent.elements() {
            if let Some(group) = child.attr("altRepGroup") {
                *alt_counts.entry(group.to_string()).or_default() += 1;
            }
            if let Some(group) = child.attr("nameTitleGroup") {
                match child.local_name() {
                    "titleInfo" => {
                        title_groups.insert(group.to_string());
                    }
                    "name" => {
                        name_groups.insert(group.to_string());
                    }
                    _ => {}
                }
            }
        }

        for child in parent.elements_mut() {
            if child
                .attr("altRepGroup")
                .is_some_and(|g| alt_counts.get(g).copied().unwrap_or(0) < 2)
            {
                child.remove_attr("altRepGroup");
            }
            let keep_name_title = match child.attr("nameTitleGroup") {
                Some(group) => {
                    matches!(child.local_name(), "titleInfo" | "name")
                        && title_groups.contains(group)
                        && name_groups.contains(group)
                }
                None => true,
            };
            if !keep_name_title {
                child.remove_attr("nameTitleGroup");
            }
        }
    });
}

/// Give group attributes numbers derived from the grouped content, so
/// numbering does not depend on document order or the original values.
fn renumber_groups(mods: &mut XmlElement, _: &Context<'_>) {
    walk_mut(mods, &mut |parent| {
        for attribute in GROUP_ATTRIBUTES {
            let mut members: FxHashMap<String, Vec<String>> = FxHashMap::default();
            for child in parent.elements() {
                if let Some(group) = child.attr(attribute) {
                    members
                        .entry(group.to_string())
                        .or_default()
                        .push(ungrouped_key(child));
                }
            }
            if members.is_empty() {
                continue;
            }
            let mut groups: Vec<(String, String)> = members
                .into_iter()
                .map(|(group, mut keys)| {
                    keys.sort();
                    (keys.join("|"), group)
                })
                .collect();
            groups.sort();
            let numbering: FxHashMap<String, String> = groups
                .into_iter()
                .enumerate()
                .map(|(i, (_, group))| (group, (i + 1).to_string()))
                .collect();
            for child in parent.elements_mut() {
                let renumbered = child.attr(attribute).and_then(|g| numbering.get(g)).cloned();
                if let Some(number) = renumbered {
                    if child.attr(attribute) != Some(number.as_str()) {
                        child.set_attr(attribute, number);
                    }
                }
            }
        }
    });
}

fn ungrouped_key(element: &XmlElement) -> String {
    let mut copy = element.clone();
    strip_group_attributes(&mut copy);
    copy.canonical_key()
}

fn strip_group_attributes(element: &mut XmlElement) {
    for attribute in GROUP_ATTRIBUTES {
        element.remove_attr(attribute);
    }
    for child in element.elements_mut() {
        strip_group_attributes(child);
    }
}

/// One `location` per child, so split and combined shapes compare equal.
fn split_locations(mods: &mut XmlElement, _: &Context<'_>) {
    walk_mut(mods, &mut |parent| {
        let needs_split = parent
            .elements()
            .any(|e| e.local_name() == "location" && e.elements().count() > 1);
        if !needs_split {
            return;
        }
        let children = std::mem::take(&mut parent.children);
        for node in children {
            match node {
                XmlNode::Element(location)
                    if location.local_name() == "location" && location.elements().count() > 1 =>
                {
                    for part in location.elements() {
                        let mut single = XmlElement::new(location.name.clone());
                        single.attributes = location.attributes.clone();
                        single.push_child(part.clone());
                        parent.push_child(single);
                    }
                }
                other => parent.children.push(other),
            }
        }
    });
}

/// Persistent URLs use https, and this object's own PURL is the primary display.
fn purl_urls(mods: &mut XmlElement, context: &Context<'_>) {
    let http_base = context.purl.replacen("https://", "http://", 1);
    let http_base = http_base
        .rsplit_once('/')
        .map_or(http_base.as_str(), |(base, _)| base)
        .to_string();
    walk_mut(mods, &mut |e| {
        if e.local_name() != "url" {
            return;
        }
        let text = e.text();
        if text.starts_with(&format!("{http_base}/")) {
            let secure = text.replacen("http://", "https://", 1);
            e.children = vec![XmlNode::Text(secure)];
        }
    });

    for location in mods.elements_mut().filter(|e| e.local_name() == "location") {
        for url in location.elements_mut().filter(|e| e.local_name() == "url") {
            if url.text().trim_end_matches('/') == context.purl && !url.has_attr("usage") {
                url.set_attr("usage", "primary display");
            }
        }
    }
}

fn default_event_type(mods: &mut XmlElement, _: &Context<'_>) {
    walk_mut(mods, &mut |e| {
        if e.local_name() == "originInfo" && !e.has_attr("eventType") {
            if let Some(kind) = infer_event_type(e) {
                e.set_attr("eventType", kind);
            }
        }
    });
}

/// Terms of one kind within a role, language or place share their
/// authority attributes, and an untyped term is a text term.
fn term_authority(mods: &mut XmlElement, _: &Context<'_>) {
    walk_mut(mods, &mut |e| {
        if !matches!(e.local_name(), "role" | "language" | "languageOfCataloging" | "place") {
            return;
        }
        for term_name in TERM_ELEMENTS {
            for term in e.elements_mut().filter(|t| t.local_name() == term_name) {
                if !term.has_attr("type") {
                    term.set_attr("type", "text");
                }
            }
            for attribute in AUTHORITY_ATTRIBUTES {
                let shared = e
                    .children_named(term_name)
                    .find_map(|t| t.attr(attribute))
                    .map(str::to_string);
                if let Some(value) = shared {
                    for term in e.elements_mut().filter(|t| t.local_name() == term_name) {
                        if !term.has_attr(attribute) {
                            term.set_attr(attribute, value.clone());
                        }
                    }
                }
            }
        }
    });
}

/// A subject with a single term carries its authority on the term.
fn subject_authority(mods: &mut XmlElement, _: &Context<'_>) {
    walk_mut(mods, &mut |subject| {
        if subject.local_name() != "subject" || subject.elements().count() != 1 {
            return;
        }
        for attribute in AUTHORITY_ATTRIBUTES {
            let Some(value) = subject.attr(attribute).map(str::to_string) else {
                continue;
            };
            let Some(term) = subject.elements_mut().next() else {
                return;
            };
            match term.attr(attribute).map(str::to_string) {
                None => term.set_attr(attribute, value),
                Some(existing) if existing == value => {}
                Some(_) => continue,
            }
            subject.remove_attr(attribute);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::super::Normalizer;
    use crate::base::XmlElement;
    use crate::legacy::mods::MAX_RELATED_DEPTH;
    use crate::vocab::Vocabulary;

    fn normalize(xml: &str) -> XmlElement {
        let doc = XmlElement::parse(xml).unwrap();
        Normalizer::new(Vocabulary::standard()).normalize(&doc, "druid:bc123df4567")
    }

    #[test]
    fn test_unmapped_elements_removed() {
        let normalized = normalize(
            r#"<mods><titleInfo><title>T</title></titleInfo><extension><foo>bar</foo></extension>
               <relatedItem><titleInfo><title>H</title></titleInfo><extension>x</extension></relatedItem></mods>"#,
        );
        let names: Vec<_> = normalized.elements().map(|e| e.local_name()).collect();
        assert_eq!(names, vec!["titleInfo", "relatedItem"]);
        let item = normalized.child("relatedItem").unwrap();
        assert!(item.child("extension").is_none());
    }

    #[test]
    fn test_related_nesting_cut_at_mapped_depth() {
        let mut xml = String::from("<mods>");
        for _ in 0..(MAX_RELATED_DEPTH + 4) {
            xml.push_str("<relatedItem><titleInfo><title>t</title></titleInfo>");
        }
        for _ in 0..(MAX_RELATED_DEPTH + 4) {
            xml.push_str("</relatedItem>");
        }
        xml.push_str("</mods>");
        let normalized = normalize(&xml);
        let mut depth = 0;
        let mut current = normalized.child("relatedItem");
        while let Some(item) = current {
            depth += 1;
            current = item.child("relatedItem");
        }
        assert_eq!(depth, MAX_RELATED_DEPTH);
    }

    #[test]
    fn test_part_keeps_mapped_shape() {
        let normalized = normalize(
            r#"<mods><part type="issue" ID="p1">loose<detail type="volume" level="1" foo="x">
                <number lang="eng">3</number><bogus>y</bogus></detail>
                <extent unit="pages"><start>7</start><end></end></extent><other/></part></mods>"#,
        );
        let part = normalized.child("part").unwrap();
        assert_eq!(part.attr("type"), Some("issue"));
        assert!(!part.has_attr("ID"));
        assert!(part.text().is_empty());
        let names: Vec<_> = part.elements().map(|e| e.local_name()).collect();
        assert_eq!(names, vec!["detail", "extent"]);
        let detail = part.child("detail").unwrap();
        assert!(!detail.has_attr("foo"));
        assert_eq!(detail.attr("level"), Some("1"));
        assert!(detail.child("bogus").is_none());
        assert!(!detail.child("number").unwrap().has_attr("lang"));
        assert!(part.child("extent").unwrap().child("end").is_none());
    }

    #[test]
    fn test_prefix_namespace_and_version() {
        let normalized = normalize(
            r#"<mods:mods xmlns:mods="http://www.loc.gov/mods/v3" version="3.3"><mods:note>x</mods:note></mods:mods>"#,
        );
        assert_eq!(normalized.name, "mods");
        assert_eq!(normalized.attr("version"), Some("3.7"));
        assert!(!normalized.has_attr("xmlns:mods"));
        assert_eq!(normalized.child_text("note").as_deref(), Some("x"));
    }

    #[test]
    fn test_only_first_primary_kept() {
        let normalized = normalize(
            r#"<mods><titleInfo usage="primary"><title>A</title></titleInfo><titleInfo usage="primary"><title>B</title></titleInfo><name usage="primary"><namePart>C</namePart></name></mods>"#,
        );
        let usages: Vec<_> = normalized.elements().map(|e| e.attr("usage")).collect();
        assert_eq!(usages, vec![Some("primary"), None, Some("primary")]);
    }

    #[test]
    fn test_orphan_groups_removed_and_renumbered() {
        let normalized = normalize(
            r#"<mods>
                <titleInfo altRepGroup="7"><title>Lone</title></titleInfo>
                <titleInfo altRepGroup="2"><title>Zebra</title></titleInfo>
                <titleInfo altRepGroup="2" lang="rus"><title>Зебра</title></titleInfo>
                <name nameTitleGroup="5"><namePart>Nobody</namePart></name>
            </mods>"#,
        );
        let titles: Vec<_> = normalized.children_named("titleInfo").collect();
        assert_eq!(titles[0].attr("altRepGroup"), None);
        assert_eq!(titles[1].attr("altRepGroup"), Some("1"));
        assert_eq!(titles[2].attr("altRepGroup"), Some("1"));
        assert_eq!(normalized.child("name").unwrap().attr("nameTitleGroup"), None);
    }

    #[test]
    fn test_split_location_and_purl() {
        let normalized = normalize(
            r#"<mods><location><physicalLocation>Green</physicalLocation><url>http://purl.stanford.edu/bc123df4567</url></location></mods>"#,
        );
        let locations: Vec<_> = normalized.children_named("location").collect();
        assert_eq!(locations.len(), 2);
        let url = locations[1].child("url").unwrap();
        assert_eq!(url.text(), "https://purl.stanford.edu/bc123df4567");
        assert_eq!(url.attr("usage"), Some("primary display"));
    }

    #[test]
    fn test_event_type_and_role_authority() {
        let normalized = normalize(
            r#"<mods><originInfo><dateIssued>1900</dateIssued></originInfo>
               <name><namePart>A</namePart><role><roleTerm type="code" authority="marcrelator">aut</roleTerm><roleTerm type="text">author</roleTerm></role></name></mods>"#,
        );
        assert_eq!(
            normalized.child("originInfo").unwrap().attr("eventType"),
            Some("publication")
        );
        let role = normalized.child("name").unwrap().child("role").unwrap();
        assert!(role.children_named("roleTerm").all(|t| t.attr("authority") == Some("marcrelator")));
    }

    #[test]
    fn test_untyped_terms_are_text() {
        let normalized = normalize(
            r#"<mods><language><languageTerm authority="iso639-2b" type="code">eng</languageTerm><languageTerm>English</languageTerm></language></mods>"#,
        );
        let language = normalized.child("language").unwrap();
        let text = language
            .children_named("languageTerm")
            .find(|t| t.attr("type") == Some("text"))
            .unwrap();
        assert_eq!(text.attr("authority"), Some("iso639-2b"));
    }

    #[test]
    fn test_subject_authority_pushed_to_sole_term() {
        let normalized = normalize(
            r#"<mods><subject authority="lcsh"><topic>Cats</topic></subject></mods>"#,
        );
        let subject = normalized.child("subject").unwrap();
        assert!(!subject.has_attr("authority"));
        assert_eq!(subject.child("topic").unwrap().attr("authority"), Some("lcsh"));
    }
}
