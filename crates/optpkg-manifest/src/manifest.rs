//! The manifest document.

use crate::attribute::{Attribute, key_of};
use crate::error::{Error, Result};
use crate::section::Section;
use crate::{ATTRIBUTE_MANIFEST_VERSION, DEFAULT_MANIFEST_VERSION};

/// A parsed or programmatically built manifest.
///
/// Holds the format version, the unnamed main section and the named
/// sections in the order they were added. See [`crate::parser`] and
/// [`crate::writer`] for the text format.
#[derive(Debug, Clone)]
pub struct Manifest {
    version: String,
    main: Section,
    sections: Vec<Section>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            version: DEFAULT_MANIFEST_VERSION.to_string(),
            main: Section::new(),
            sections: Vec::new(),
        }
    }
}

impl Manifest {
    /// Create an empty manifest with the default version.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the default manifest for generated archives: version `1.0`
    /// and a `Created-By` attribute.
    pub fn with_created_by(created_by: impl Into<String>) -> Self {
        let mut manifest = Self::new();
        manifest.main.insert("Created-By", created_by);
        manifest
    }

    /// The manifest format version.
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn set_version(&mut self, version: impl Into<String>) {
        self.version = version.into();
    }

    /// The unnamed main section.
    pub fn main_section(&self) -> &Section {
        &self.main
    }

    pub fn main_section_mut(&mut self) -> &mut Section {
        &mut self.main
    }

    /// Look up a named section. Section names are matched exactly.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name() == Some(name))
    }

    pub fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.name() == Some(name))
    }

    /// Named sections in insertion order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Names of the named sections in insertion order.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().filter_map(Section::name)
    }

    /// Add a named section.
    ///
    /// A section with the same name is replaced at its original position.
    pub fn add_section(&mut self, section: Section) -> Result<()> {
        let Some(name) = section.name() else {
            return Err(Error::UnnamedSection);
        };
        match self.sections.iter().position(|s| s.name() == Some(name)) {
            Some(i) => self.sections[i] = section,
            None => self.sections.push(section),
        }
        Ok(())
    }

    /// Add an attribute to the main section.
    ///
    /// `Manifest-Version` sets the document version instead of being stored.
    pub fn add_attribute(&mut self, attribute: Attribute) -> Result<()> {
        if attribute.key() == key_of(ATTRIBUTE_MANIFEST_VERSION) {
            self.version = attribute.value();
            return Ok(());
        }
        self.main.add_configured_attribute(attribute)
    }

    /// Merge another manifest into this one.
    ///
    /// With `overwrite_main` the main section of `other` replaces ours,
    /// otherwise the sections are merged attribute by attribute (see
    /// [`Section::merge`]). The version of `other` always wins. Named
    /// sections missing here are copied; existing ones are merged.
    pub fn merge(
        &mut self,
        other: &Manifest,
        overwrite_main: bool,
        merge_class_paths: bool,
    ) -> Result<()> {
        if overwrite_main {
            self.main = Section::new();
            for attribute in other.main.attributes() {
                self.main.set_attribute(attribute.clone());
            }
        } else {
            self.main.merge(&other.main, merge_class_paths)?;
        }

        self.version = other.version.clone();

        for theirs in &other.sections {
            let Some(name) = theirs.name() else {
                continue;
            };
            match self.section_mut(name) {
                Some(ours) => ours.merge(theirs, merge_class_paths)?,
                None => self.sections.push(theirs.clone()),
            }
        }
        Ok(())
    }

    /// Warnings collected from the main section and every named section.
    pub fn warnings(&self) -> Vec<&str> {
        std::iter::once(&self.main)
            .chain(self.sections.iter())
            .flat_map(|s| s.warnings().iter().map(String::as_str))
            .collect()
    }
}

impl PartialEq for Manifest {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
            && self.main == other.main
            && self.sections.len() == other.sections.len()
            && self.sections.iter().all(|s| {
                s.name()
                    .and_then(|name| other.section(name))
                    .is_some_and(|theirs| theirs == s)
            })
    }
}

impl Eq for Manifest {}
