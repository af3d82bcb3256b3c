//! Reading descriptors out of a manifest.
//!
//! All attribute values are trimmed before use, since many archives in
//! the wild carry trailing spaces after versions and vendor ids.

use optpkg_manifest::{Manifest, Section};

use crate::error::{Error, Result};
use crate::extension::Extension;
use crate::specification::Specification;
use crate::{
    EXTENSION_LIST, EXTENSION_NAME, IMPLEMENTATION_TITLE, IMPLEMENTATION_URL,
    IMPLEMENTATION_VENDOR, IMPLEMENTATION_VENDOR_ID, IMPLEMENTATION_VERSION,
    OPTIONAL_EXTENSION_LIST, SPECIFICATION_TITLE, SPECIFICATION_VENDOR, SPECIFICATION_VERSION,
};

/// Extensions the archive provides: one per section (main first) that
/// carries an `Extension-Name`.
pub fn available(manifest: &Manifest) -> Result<Vec<Extension>> {
    let mut extensions = Vec::new();
    for section in all_sections(manifest) {
        if let Some(extension) = extension_from_section(section, "")? {
            extensions.push(extension);
        }
    }
    Ok(extensions)
}

/// Extensions listed in `Extension-List`.
pub fn required(manifest: &Manifest) -> Result<Vec<Extension>> {
    listed(manifest, EXTENSION_LIST)
}

/// Extensions listed in `Optional-Extension-List`.
pub fn optional(manifest: &Manifest) -> Result<Vec<Extension>> {
    listed(manifest, OPTIONAL_EXTENSION_LIST)
}

fn listed(manifest: &Manifest, list_attribute: &str) -> Result<Vec<Extension>> {
    let mut extensions = Vec::new();
    for section in all_sections(manifest) {
        let Some(tokens) = section.value(list_attribute) else {
            continue;
        };
        for token in tokens.split(' ').filter(|t| !t.is_empty()) {
            match extension_from_section(section, &format!("{token}-"))? {
                Some(extension) => extensions.push(extension),
                None => tracing::debug!(
                    token,
                    list = list_attribute,
                    "listed extension has no name attribute"
                ),
            }
        }
    }
    Ok(extensions)
}

/// Build one extension from the attributes of `section` whose keys start
/// with `prefix`. Returns `None` when the prefixed `Extension-Name` is
/// absent.
pub fn extension_from_section(section: &Section, prefix: &str) -> Result<Option<Extension>> {
    let get = |key: &str| trimmed(section, &format!("{prefix}{key}"));

    let Some(name) = get(EXTENSION_NAME) else {
        return Ok(None);
    };

    let mut builder = Extension::builder(name);
    if let Some(vendor) = get(SPECIFICATION_VENDOR) {
        builder = builder.specification_vendor(vendor);
    }
    if let Some(version) = get(SPECIFICATION_VERSION) {
        builder = builder.specification_version(version);
    }
    if let Some(version) = get(IMPLEMENTATION_VERSION) {
        builder = builder.implementation_version(version);
    }
    if let Some(vendor) = get(IMPLEMENTATION_VENDOR) {
        builder = builder.implementation_vendor(vendor);
    }
    if let Some(id) = get(IMPLEMENTATION_VENDOR_ID) {
        builder = builder.implementation_vendor_id(id);
    }
    if let Some(url) = get(IMPLEMENTATION_URL) {
        builder = builder.implementation_url(url);
    }
    builder.build().map(Some)
}

/// Package specifications declared by the named sections.
///
/// A section without `Specification-Title` declares nothing. Once the
/// title is present, the remaining specification and implementation
/// attributes are mandatory. Records that differ only in their section
/// are merged into one, keeping the position of the first.
pub fn specifications(manifest: &Manifest) -> Result<Vec<Specification>> {
    let mut found = Vec::new();
    for section in manifest.sections() {
        if let Some(specification) = specification_from_section(section)? {
            found.push(specification);
        }
    }
    Ok(merge_duplicates(found))
}

fn specification_from_section(section: &Section) -> Result<Option<Specification>> {
    let Some(name) = section.name() else {
        return Ok(None);
    };
    let Some(title) = trimmed(section, SPECIFICATION_TITLE) else {
        return Ok(None);
    };

    let require = |key: &str| {
        trimmed(section, key).ok_or_else(|| Error::MissingAttribute {
            attribute: key.to_string(),
            section: name.to_string(),
        })
    };
    let specification_vendor = require(SPECIFICATION_VENDOR)?;
    let specification_version = require(SPECIFICATION_VERSION)?;
    let implementation_title = require(IMPLEMENTATION_TITLE)?;
    let implementation_version = require(IMPLEMENTATION_VERSION)?;
    let implementation_vendor = require(IMPLEMENTATION_VENDOR)?;

    Specification::builder(title)
        .specification_vendor(specification_vendor)
        .specification_version(specification_version)
        .implementation_title(implementation_title)
        .implementation_version(implementation_version)
        .implementation_vendor(implementation_vendor)
        .section(name)
        .build()
        .map(Some)
}

/// Partition records by identity (every field but the sections) and emit
/// one record per class, in order of first appearance.
fn merge_duplicates(specifications: Vec<Specification>) -> Vec<Specification> {
    let mut groups: Vec<Vec<Specification>> = Vec::new();
    for specification in specifications {
        let existing = groups.iter_mut().find(|group| {
            group
                .first()
                .is_some_and(|first| first.same_identity(&specification))
        });
        match existing {
            Some(group) => group.push(specification),
            None => groups.push(vec![specification]),
        }
    }
    groups
        .into_iter()
        .filter_map(Specification::merge_group)
        .collect()
}

fn all_sections(manifest: &Manifest) -> impl Iterator<Item = &Section> {
    std::iter::once(manifest.main_section()).chain(manifest.sections())
}

fn trimmed(section: &Section, key: &str) -> Option<String> {
    section.value(key).map(|value| value.trim().to_string())
}
