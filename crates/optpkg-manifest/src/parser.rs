//! Reading manifest text.
//!
//! Lines may end in `\n` or `\r\n`. A line starting with a single space
//! continues the previous value; a blank line ends a section. A `Name`
//! attribute found before the blank line starts the next section early.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;
use std::str::FromStr;

use crate::attribute::{Attribute, key_of};
use crate::error::{Error, Result};
use crate::manifest::Manifest;
use crate::section::Section;
use crate::{ATTRIBUTE_MANIFEST_VERSION, ATTRIBUTE_NAME};

/// Read a manifest from buffered text.
pub fn read_manifest<R: BufRead>(reader: R) -> Result<Manifest> {
    let mut lines = reader.lines();
    let mut manifest = Manifest::new();

    let mut next_name = read_section(manifest.main_section_mut(), &mut lines, None)?;
    if let Some(version) = manifest
        .main_section_mut()
        .remove_attribute(ATTRIBUTE_MANIFEST_VERSION)
    {
        manifest.set_version(version.value());
    }

    while let Some(line) = lines.next().transpose()? {
        if line.is_empty() {
            continue;
        }

        let mut section = Section::new();
        let mut current = None;
        let name = match next_name.take() {
            None => {
                let attribute = Attribute::parse(&line)?;
                if attribute.key() != key_of(ATTRIBUTE_NAME) {
                    return Err(Error::SectionMissingName {
                        found: attribute.name().to_string(),
                    });
                }
                attribute.value()
            }
            Some(name) => {
                // The previous section ended on a `Name` line, so this
                // line is already the first attribute of the new section.
                let attribute = Attribute::parse(&line)?;
                let key = attribute.name().to_string();
                section.add_attribute(attribute)?;
                current = section.contains(&key).then_some(key);
                name
            }
        };

        section.set_name(name);
        next_name = read_section(&mut section, &mut lines, current)?;
        tracing::trace!(section = ?section.name(), attributes = section.len(), "read section");
        manifest.add_section(section)?;
    }

    Ok(manifest)
}

/// Read attributes into `section` until a blank line, end of input, or a
/// `Name` attribute. Returns the name read ahead, if any.
///
/// `current` names the attribute that continuation lines extend. With no
/// current attribute a continuation extends the section name, which is
/// only valid for named sections.
fn read_section<R: BufRead>(
    section: &mut Section,
    lines: &mut Lines<R>,
    mut current: Option<String>,
) -> Result<Option<String>> {
    loop {
        let Some(line) = lines.next().transpose()? else {
            return Ok(None);
        };
        if line.is_empty() {
            return Ok(None);
        }

        if let Some(rest) = line.strip_prefix(' ') {
            if let Some(attribute) = current.as_deref().and_then(|key| section.attribute_mut(key)) {
                attribute.add_continuation(rest);
            } else if section.name().is_some() {
                section.extend_name(rest);
            } else {
                return Err(Error::ContinuationWithoutAttribute { line });
            }
            continue;
        }

        let attribute = Attribute::parse(&line)?;
        let key = attribute.name().to_string();
        if let Some(next) = section.add_attribute(attribute)? {
            return Ok(Some(next));
        }
        // Dropped attributes (`From*`) leave nothing to continue.
        current = section.contains(&key).then_some(key);
    }
}

impl Manifest {
    /// Read a manifest from buffered text.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        read_manifest(reader)
    }

    /// Read a manifest file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::file(path, e))?;
        read_manifest(BufReader::new(file))
    }
}

impl FromStr for Manifest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        read_manifest(s.as_bytes())
    }
}
