//! Manifest sections: ordered, case-insensitive attribute stores.

use crate::attribute::{Attribute, key_of};
use crate::error::{Error, Result};
use crate::{ATTRIBUTE_CLASSPATH, ATTRIBUTE_FROM, ATTRIBUTE_NAME};

/// A group of attributes, either the unnamed main section or a named one.
///
/// Attributes keep their insertion order. Keys are unique and compared
/// case-insensitively; the original spelling of each name is kept for
/// writing.
#[derive(Debug, Clone, Default)]
pub struct Section {
    name: Option<String>,
    attributes: Vec<Attribute>,
    warnings: Vec<String>,
}

impl Section {
    /// Create an unnamed (main) section.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a named section.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// The section name, `None` for the main section.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Extend the section name with continuation text.
    pub(crate) fn extend_name(&mut self, text: &str) {
        if let Some(name) = self.name.as_mut() {
            name.push_str(text);
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        let key = key_of(name);
        self.attributes.iter().position(|a| a.key() == key)
    }

    /// Look up an attribute by name, ignoring case.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.position(name).map(|i| &self.attributes[i])
    }

    pub(crate) fn attribute_mut(&mut self, name: &str) -> Option<&mut Attribute> {
        self.position(name).map(|i| &mut self.attributes[i])
    }

    /// The (space-joined) value of an attribute, ignoring case of the name.
    pub fn value(&self, name: &str) -> Option<String> {
        self.attribute(name).map(Attribute::value)
    }

    /// Whether an attribute with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Attributes in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter()
    }

    /// Attribute names in insertion order.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(Attribute::name)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Remove an attribute, returning it if it was present.
    pub fn remove_attribute(&mut self, name: &str) -> Option<Attribute> {
        self.position(name).map(|i| self.attributes.remove(i))
    }

    /// Store an attribute, replacing any attribute with the same key.
    ///
    /// A replaced attribute keeps its position; a new one is appended.
    /// Unlike [`Section::add_configured_attribute`] no pseudo-attribute
    /// rules apply: a stored `Name` is kept here but never written, since
    /// the header of a section always comes from [`Section::name`].
    pub fn set_attribute(&mut self, attribute: Attribute) {
        match self.position(attribute.name()) {
            Some(i) => self.attributes[i] = attribute,
            None => self.attributes.push(attribute),
        }
    }

    /// Store a single-valued attribute, replacing any existing value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.set_attribute(Attribute::new(name, value));
    }

    /// Add an attribute read from manifest text.
    ///
    /// Returns `Some(name)` when the attribute is a `Name` attribute: it is
    /// not stored and instead names the section that starts here. `From*`
    /// attributes are dropped with a warning. A repeated `Class-Path` adds
    /// its values to the existing one; any other repeated key is an error.
    pub fn add_attribute(&mut self, attribute: Attribute) -> Result<Option<String>> {
        let key = attribute.key();
        if key == key_of(ATTRIBUTE_NAME) {
            self.warn(format!(
                "\"{ATTRIBUTE_NAME}\" attributes should not occur in the main section and must be the first element in all other sections: \"{}: {}\"",
                attribute.name(),
                attribute.value()
            ));
            return Ok(Some(attribute.value()));
        }

        if key.starts_with(&key_of(ATTRIBUTE_FROM)) {
            self.warn(format!(
                "Manifest attributes should not start with \"{ATTRIBUTE_FROM}\" in \"{}: {}\"",
                attribute.name(),
                attribute.value()
            ));
            return Ok(None);
        }

        if key == key_of(ATTRIBUTE_CLASSPATH) {
            if let Some(existing) = self.attribute_mut(ATTRIBUTE_CLASSPATH) {
                for value in attribute.values() {
                    existing.add_value(value.clone());
                }
                self.warn(
                    "Multiple Class-Path attributes are supported but violate the Jar specification and may not be correctly processed in all environments",
                );
            } else {
                self.attributes.push(attribute);
            }
            return Ok(None);
        }

        if self.contains(attribute.name()) {
            return Err(Error::DuplicateAttribute {
                name: attribute.name().to_string(),
            });
        }
        self.attributes.push(attribute);
        Ok(None)
    }

    /// Add an attribute supplied by a caller building a section.
    ///
    /// Same rules as [`Section::add_attribute`], except that a `Name`
    /// attribute is rejected: the section name is set at construction.
    pub fn add_configured_attribute(&mut self, attribute: Attribute) -> Result<()> {
        match self.add_attribute(attribute)? {
            Some(_) => Err(Error::NameAttributeNotAllowed),
            None => Ok(()),
        }
    }

    /// Merge another section into this one.
    ///
    /// Attributes of `other` replace ours. `Class-Path` values from `other`
    /// are kept and, when `merge_class_paths` is set, followed by the values
    /// already present here.
    pub fn merge(&mut self, other: &Section, merge_class_paths: bool) -> Result<()> {
        let names_differ = match (&self.name, &other.name) {
            (None, Some(_)) => true,
            (Some(ours), Some(theirs)) => key_of(ours) != key_of(theirs),
            _ => false,
        };
        if names_differ {
            return Err(Error::SectionNameMismatch {
                ours: self.name.clone(),
                theirs: other.name.clone(),
            });
        }

        let mut class_path: Option<Vec<String>> = None;
        for attribute in other.attributes() {
            if attribute.key() == key_of(ATTRIBUTE_CLASSPATH) {
                class_path
                    .get_or_insert_with(Vec::new)
                    .extend(attribute.values().iter().cloned());
            } else {
                self.set_attribute(attribute.clone());
            }
        }

        if let Some(mut values) = class_path {
            if merge_class_paths {
                if let Some(current) = self.attribute(ATTRIBUTE_CLASSPATH) {
                    values.extend(current.values().iter().cloned());
                }
            }
            self.set_attribute(Attribute::from_values(ATTRIBUTE_CLASSPATH, values));
        }

        self.warnings.extend(other.warnings.iter().cloned());
        Ok(())
    }

    /// Warnings collected while reading or merging this section.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(section = ?self.name, "{}", message);
        self.warnings.push(message);
    }
}

impl PartialEq for Section {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.attributes.len() == other.attributes.len()
            && self
                .attributes
                .iter()
                .all(|a| other.attribute(a.name()) == Some(a))
    }
}

impl Eq for Section {}
