//! Writing manifest text.
//!
//! Output always uses `\r\n` line endings. No line exceeds
//! [`MAX_SECTION_LENGTH`] bytes before its terminator: longer lines are
//! split on a character boundary and continued on the next line after a
//! single space.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::attribute::{Attribute, key_of};
use crate::error::{Error, Result};
use crate::manifest::Manifest;
use crate::section::Section;
use crate::{ATTRIBUTE_MANIFEST_VERSION, ATTRIBUTE_NAME, ATTRIBUTE_SIGNATURE_VERSION};

/// Maximum bytes of a single written line, excluding the terminator.
pub const MAX_SECTION_LENGTH: usize = 70;

/// Names longer than this are written on a line of their own.
pub const MAX_NAME_VALUE_LENGTH: usize = 68;

/// Names longer than this cannot be written at all.
pub const MAX_NAME_LENGTH: usize = 70;

/// Line terminator used for all output.
pub const EOL: &str = "\r\n";

/// Write a manifest.
///
/// The version comes first, followed by `Signature-Version` when the main
/// section has one, then the rest of the main section and every named
/// section in order. With `flatten`, multi-valued attributes are written
/// as one line holding the joined value instead of one line per value.
///
/// A `Name` attribute stored in a section is never written: the section
/// header comes from [`Section::name`]. A `Manifest-Version` attribute in
/// the main section is likewise replaced by [`Manifest::version`].
pub fn write_manifest<W: Write>(manifest: &Manifest, writer: &mut W, flatten: bool) -> Result<()> {
    write_value(writer, ATTRIBUTE_MANIFEST_VERSION, manifest.version())?;

    let main = manifest.main_section();
    if let Some(signature) = main.attribute(ATTRIBUTE_SIGNATURE_VERSION) {
        write_value(writer, ATTRIBUTE_SIGNATURE_VERSION, &signature.value())?;
    }
    write_section(
        main,
        writer,
        flatten,
        &[ATTRIBUTE_NAME, ATTRIBUTE_MANIFEST_VERSION, ATTRIBUTE_SIGNATURE_VERSION],
    )?;

    for section in manifest.sections() {
        write_section(section, writer, flatten, &[ATTRIBUTE_NAME])?;
    }
    Ok(())
}

fn write_section<W: Write>(
    section: &Section,
    writer: &mut W,
    flatten: bool,
    skip: &[&str],
) -> Result<()> {
    if let Some(name) = section.name() {
        write_value(writer, ATTRIBUTE_NAME, name)?;
    }
    for attribute in section.attributes() {
        if skip.iter().any(|name| attribute.key() == key_of(name)) {
            tracing::debug!(attribute = attribute.name(), "skipping pseudo-attribute");
            continue;
        }
        write_attribute(attribute, writer, flatten)?;
    }
    writer.write_all(EOL.as_bytes())?;
    Ok(())
}

fn write_attribute<W: Write>(attribute: &Attribute, writer: &mut W, flatten: bool) -> Result<()> {
    if flatten {
        return write_value(writer, attribute.name(), &attribute.value());
    }
    for value in attribute.values() {
        write_value(writer, attribute.name(), value)?;
    }
    Ok(())
}

/// Write one `name: value` line, wrapping it as needed.
fn write_value<W: Write>(writer: &mut W, name: &str, value: &str) -> Result<()> {
    let overflow = || Error::LineOverflow {
        name: name.to_string(),
        value: value.to_string(),
    };

    let mut line = if name.len() > MAX_NAME_VALUE_LENGTH {
        if name.len() > MAX_NAME_LENGTH {
            return Err(overflow());
        }
        write!(writer, "{name}: {EOL}")?;
        format!(" {value}")
    } else {
        format!("{name}: {value}")
    };

    while line.len() > MAX_SECTION_LENGTH {
        let split = floor_char_boundary(&line, MAX_SECTION_LENGTH);
        if split == 0 {
            return Err(overflow());
        }
        write!(writer, "{}{EOL}", &line[..split])?;
        line = format!(" {}", &line[split..]);
    }
    write!(writer, "{line}{EOL}")?;
    Ok(())
}

/// The largest char boundary of `s` that is not after `index`.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    (0..=index).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0)
}

impl Manifest {
    /// Write the manifest to any writer.
    pub fn write_to<W: Write>(&self, writer: &mut W, flatten: bool) -> Result<()> {
        write_manifest(self, writer, flatten)
    }

    /// Render the manifest as text without flattening.
    pub fn to_text(&self) -> Result<String> {
        let mut buf = Vec::new();
        write_manifest(self, &mut buf, false)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Write the manifest to a file, replacing any existing content.
    pub fn write_to_path(&self, path: impl AsRef<Path>, flatten: bool) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| Error::file(path, e))?;
        let mut writer = BufWriter::new(file);
        write_manifest(self, &mut writer, flatten)?;
        writer.flush().map_err(|e| Error::file(path, e))?;
        tracing::debug!(path = %path.display(), "wrote manifest");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(name: &str, value: &str) -> Result<String> {
        let mut buf = Vec::new();
        write_value(&mut buf, name, value)?;
        Ok(String::from_utf8(buf).unwrap())
    }

    #[test]
    fn test_short_line_written_as_is() {
        assert_eq!(render("Foo", "bar").unwrap(), "Foo: bar\r\n");
    }

    #[test]
    fn test_exactly_seventy_bytes_not_wrapped() {
        let value = "x".repeat(70 - "Foo: ".len());
        let text = render("Foo", &value).unwrap();
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_floor_char_boundary() {
        let s = "aé";
        assert_eq!(floor_char_boundary(s, 2), 1);
        assert_eq!(floor_char_boundary(s, 3), 3);
        assert_eq!(floor_char_boundary(s, 10), 3);
        assert_eq!(floor_char_boundary(s, 0), 0);
    }
}
