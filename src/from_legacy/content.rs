//! contentMetadata reader.

use crate::base::XmlElement;
use crate::cocina::{
    ContentFragment, DigestType, File, FileAccess, FileAdministrative, FileSet, FileSetStructural,
    MemberOrder, MessageDigest, ObjectType, Presentation, ResourceType, ViewingDirection,
};
use crate::cocina::structural::FILE_TYPE;
use crate::error::{MappingError, Result};
use crate::ids::{IdGenerator, SuffixSource};
use crate::legacy::Datastream;
use crate::vocab::Vocabulary;

pub(super) fn read<S: SuffixSource>(
    vocab: &Vocabulary,
    ids: &mut IdGenerator<S>,
    content: &XmlElement,
    object_id: &str,
) -> Result<ContentFragment> {
    let content_type = content.attr("type").unwrap_or("file");
    let object_type = vocab
        .object_type_for_content(content_type)
        .and_then(ObjectType::from_code)
        .ok_or_else(|| {
            MappingError::unmappable(
                Datastream::Content.name(),
                format!("unknown content type '{content_type}'"),
            )
        })?;

    let mut contains = Vec::new();
    for resource in content.children_named("resource") {
        contains.push(read_resource(ids, resource, object_id)?);
    }

    let has_member_orders = content
        .children_named("bookData")
        .filter_map(|book| book.attr("readingOrder"))
        .filter_map(ViewingDirection::from_reading_order)
        .map(|direction| MemberOrder {
            viewing_direction: Some(direction),
            members: Vec::new(),
        })
        .collect();

    Ok(ContentFragment {
        object_type,
        contains,
        has_member_orders,
    })
}

fn read_resource<S: SuffixSource>(
    ids: &mut IdGenerator<S>,
    resource: &XmlElement,
    object_id: &str,
) -> Result<FileSet> {
    let resource_id = resource.attr("id");
    let kind = resource
        .attr("type")
        .map_or(Some(ResourceType::File), ResourceType::from_code)
        .ok_or_else(|| {
            MappingError::unmappable(
                Datastream::Content.name(),
                format!("unknown resource type '{}'", resource.attr("type").unwrap_or_default()),
            )
        })?;
    let label = resource
        .child_text("label")
        .or_else(|| {
            resource
                .children_named("attr")
                .find(|attr| attr.attr("name") == Some("label"))
                .and_then(XmlElement::text_opt)
        })
        .unwrap_or_default();

    let mut files = Vec::new();
    for file in resource.children_named("file") {
        files.push(read_file(ids, file, resource_id, object_id)?);
    }

    Ok(FileSet {
        kind,
        external_identifier: ids.file_set_id(object_id, resource_id),
        label,
        version: 1,
        structural: FileSetStructural { contains: files },
    })
}

fn read_file<S: SuffixSource>(
    ids: &mut IdGenerator<S>,
    file: &XmlElement,
    resource_id: Option<&str>,
    object_id: &str,
) -> Result<File> {
    let filename = file.attr("id").ok_or_else(|| {
        MappingError::unmappable(Datastream::Content.name(), "file without an id")
    })?;
    let size = file
        .attr("size")
        .map(|size| {
            size.parse::<u64>().map_err(|_| {
                MappingError::unmappable(
                    Datastream::Content.name(),
                    format!("file '{filename}' has a non-numeric size '{size}'"),
                )
            })
        })
        .transpose()?;
    let flag = |name: &str| file.attr(name).is_some_and(|v| v.eq_ignore_ascii_case("yes"));

    let has_message_digests = file
        .children_named("checksum")
        .filter_map(|checksum| {
            let kind = checksum
                .attr("type")
                .map(str::to_ascii_lowercase)
                .and_then(|t| DigestType::from_code(&t.replace('-', "")))?;
            Some(MessageDigest {
                kind,
                digest: checksum.text(),
            })
        })
        .collect();

    let presentation = file.child("imageData").map(|image| Presentation {
        height: image.attr("height").and_then(|h| h.parse().ok()),
        width: image.attr("width").and_then(|w| w.parse().ok()),
    });

    Ok(File {
        kind: FILE_TYPE.to_string(),
        external_identifier: ids.file_id(object_id, resource_id, Some(filename)),
        label: filename.to_string(),
        filename: filename.to_string(),
        size,
        version: 1,
        has_mime_type: file.attr("mimetype").map(str::to_string),
        use_: file.attr("role").map(str::to_string),
        has_message_digests,
        access: FileAccess::default(),
        administrative: FileAdministrative {
            publish: flag("publish"),
            sdr_preserve: flag("preserve"),
            shelve: flag("shelve"),
        },
        presentation,
    })
}
