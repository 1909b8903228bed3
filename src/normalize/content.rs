//! contentMetadata rules.

use super::{Context, Rule, remove_empty_elements, strip_presentation_attributes, trim_text};
use crate::base::{XmlElement, XmlNode};

pub(super) const RULES: &[(&str, Rule)] = &[
    ("strip presentation attributes", strip_presentation_attributes),
    ("trim text", trim_text),
    ("object id", object_id),
    ("default content type", default_content_type),
    ("label attributes", label_attributes),
    ("default resource type", default_resource_type),
    ("default file flags", default_file_flags),
    ("checksum types", checksum_types),
    ("sequence numbers", sequence_numbers),
    ("remove empty elements", remove_empty_elements),
];

const FILE_FLAGS: [&str; 3] = ["publish", "shelve", "preserve"];

fn object_id(content: &mut XmlElement, context: &Context<'_>) {
    if content.attr("objectId") != Some(context.object_id.as_str()) {
        content.set_attr("objectId", context.object_id.clone());
    }
}

fn default_content_type(content: &mut XmlElement, _: &Context<'_>) {
    if !content.has_attr("type") {
        content.set_attr("type", "file");
    }
}

fn resources_mut(content: &mut XmlElement) -> impl Iterator<Item = &mut XmlElement> {
    content.elements_mut().filter(|e| e.local_name() == "resource")
}

/// `<attr name="label">` is the old spelling of `<label>`.
fn label_attributes(content: &mut XmlElement, _: &Context<'_>) {
    for resource in resources_mut(content) {
        let is_label_attr =
            |e: &XmlElement| e.local_name() == "attr" && e.attr("name") == Some("label");
        let Some(label) = resource.elements().find(|&e| is_label_attr(e)).map(XmlElement::text) else {
            continue;
        };
        resource.retain_elements(|e| !is_label_attr(e));
        if resource.child("label").is_none() {
            resource
                .children
                .insert(0, XmlNode::Element(XmlElement::text_element("label", label)));
        }
    }
}

fn default_resource_type(content: &mut XmlElement, _: &Context<'_>) {
    for resource in resources_mut(content) {
        if !resource.has_attr("type") {
            resource.set_attr("type", "file");
        }
    }
}

fn default_file_flags(content: &mut XmlElement, _: &Context<'_>) {
    for resource in resources_mut(content) {
        for file in resource.elements_mut().filter(|e| e.local_name() == "file") {
            for flag in FILE_FLAGS {
                if !file.has_attr(flag) {
                    file.set_attr(flag, "no");
                }
            }
        }
    }
}

fn checksum_types(content: &mut XmlElement, _: &Context<'_>) {
    super::walk_mut(content, &mut |e| {
        if e.local_name() != "checksum" {
            return;
        }
        let canonical = match e.attr("type").map(str::to_ascii_lowercase).as_deref() {
            Some("sha-1" | "sha1") => "sha1",
            Some("md5" | "md-5") => "md5",
            _ => return,
        };
        if e.attr("type") != Some(canonical) {
            e.set_attr("type", canonical);
        }
    });
}

/// Resources are numbered 1..n in document order.
fn sequence_numbers(content: &mut XmlElement, _: &Context<'_>) {
    for (index, resource) in resources_mut(content).enumerate() {
        let sequence = (index + 1).to_string();
        if resource.attr("sequence") != Some(sequence.as_str()) {
            resource.set_attr("sequence", sequence);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::normalize;
    use crate::base::XmlElement;

    #[test]
    fn test_content_normalization() {
        let doc = XmlElement::parse(
            r#"<contentMetadata type="image" objectId="bc123df4567">
                <resource id="bc123df4567_1" sequence="5">
                    <attr name="label">Image 1</attr>
                    <file id="a.jp2" mimetype="image/jp2" size="12" publish="yes">
                        <checksum type="SHA-1">abc</checksum>
                        <checksum type="MD5">def</checksum>
                    </file>
                </resource>
            </contentMetadata>"#,
        )
        .unwrap();
        let normalized = normalize(&doc, "bc123df4567");
        assert_eq!(normalized.attr("objectId"), Some("druid:bc123df4567"));
        let resource = normalized.child("resource").unwrap();
        assert_eq!(resource.attr("sequence"), Some("1"));
        assert_eq!(resource.attr("type"), Some("file"));
        assert_eq!(resource.child_text("label").as_deref(), Some("Image 1"));
        assert!(resource.child("attr").is_none());
        let file = resource.child("file").unwrap();
        assert_eq!(file.attr("publish"), Some("yes"));
        assert_eq!(file.attr("shelve"), Some("no"));
        let types: Vec<_> = file.children_named("checksum").map(|c| c.attr("type")).collect();
        assert_eq!(types, vec![Some("sha1"), Some("md5")]);
    }
}
