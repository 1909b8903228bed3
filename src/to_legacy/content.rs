//! contentMetadata writer.

use crate::base::XmlElement;
use crate::cocina::{ContentFragment, File, FileSet};
use crate::error::{MappingError, Result};
use crate::ids::resource_suffix;
use crate::vocab::Vocabulary;

pub(super) fn write(
    vocab: &Vocabulary,
    content: &ContentFragment,
    object_id: &str,
) -> Result<XmlElement> {
    let object_type = content.object_type.code();
    let content_type = vocab
        .content_type_for_object(object_type)
        .ok_or_else(|| MappingError::UnsupportedObjectType(object_type.to_string()))?;

    let mut element = XmlElement::new("contentMetadata")
        .with_attr("objectId", object_id)
        .with_attr("type", content_type);
    for order in &content.has_member_orders {
        if let Some(direction) = order.viewing_direction {
            element.push_child(
                XmlElement::new("bookData").with_attr("readingOrder", direction.reading_order()),
            );
        }
    }
    for (index, file_set) in content.contains.iter().enumerate() {
        element.push_child(write_resource(file_set, index + 1, object_id));
    }
    Ok(element)
}

fn write_resource(file_set: &FileSet, sequence: usize, object_id: &str) -> XmlElement {
    let mut resource = XmlElement::new("resource")
        .with_attr("id", resource_suffix(&file_set.external_identifier, object_id))
        .with_attr("sequence", sequence.to_string())
        .with_attr("type", file_set.kind.code());
    if !file_set.label.is_empty() {
        resource.push_child(XmlElement::text_element("label", file_set.label.clone()));
    }
    for file in &file_set.structural.contains {
        resource.push_child(write_file(file));
    }
    resource
}

fn write_file(file: &File) -> XmlElement {
    let flag = |set: bool| if set { "yes" } else { "no" };
    let administrative = file.administrative;
    let mut element = XmlElement::new("file")
        .with_attr("id", file.filename.clone())
        .with_opt_attr("mimetype", file.has_mime_type.as_deref())
        .with_opt_attr("size", file.size.map(|size| size.to_string()).as_deref())
        .with_attr("publish", flag(administrative.publish))
        .with_attr("shelve", flag(administrative.shelve))
        .with_attr("preserve", flag(administrative.sdr_preserve))
        .with_opt_attr("role", file.use_.as_deref());
    for digest in &file.has_message_digests {
        element.push_child(
            XmlElement::text_element("checksum", digest.digest.clone())
                .with_attr("type", digest.kind.code()),
        );
    }
    if let Some(presentation) = file.presentation {
        element.push_child(
            XmlElement::new("imageData")
                .with_opt_attr("height", presentation.height.map(|h| h.to_string()).as_deref())
                .with_opt_attr("width", presentation.width.map(|w| w.to_string()).as_deref()),
        );
    }
    element
}
