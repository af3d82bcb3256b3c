//! A single manifest attribute.

use crate::error::{Error, Result};

/// A named manifest attribute.
///
/// Names keep their original case but compare case-insensitively through
/// [`Attribute::key`]. An attribute normally holds one value; `Class-Path`
/// may collect several, which [`Attribute::value`] joins with a space.
#[derive(Debug, Clone)]
pub struct Attribute {
    name: String,
    values: Vec<String>,
}

impl Attribute {
    /// Create an attribute with a single value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: vec![value.into()],
        }
    }

    /// Create an attribute holding several values.
    pub(crate) fn from_values(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Parse a `Name: value` header line.
    ///
    /// The line is split at the first `": "`; everything after it, including
    /// further separators and trailing whitespace, is the value.
    ///
    /// # Example
    /// ```
    /// use optpkg_manifest::Attribute;
    ///
    /// let attribute = Attribute::parse("Class-Path: a.jar b.jar").unwrap();
    /// assert_eq!(attribute.name(), "Class-Path");
    /// assert_eq!(attribute.value(), "a.jar b.jar");
    /// ```
    pub fn parse(line: &str) -> Result<Self> {
        let (name, value) = line
            .split_once(": ")
            .ok_or_else(|| Error::MissingSeparator {
                line: line.to_string(),
            })?;
        Ok(Self::new(name, value))
    }

    /// The attribute name as written.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The lookup key: the name lower-cased.
    pub fn key(&self) -> String {
        key_of(&self.name)
    }

    /// All values joined with a single space.
    pub fn value(&self) -> String {
        self.values.join(" ")
    }

    /// The individual values in insertion order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Append another value (used for repeated `Class-Path` entries).
    pub fn add_value(&mut self, value: impl Into<String>) {
        self.values.push(value.into());
    }

    /// Append continuation text to the value currently being read.
    pub(crate) fn add_continuation(&mut self, text: &str) {
        match self.values.last_mut() {
            Some(current) => current.push_str(text),
            None => self.values.push(text.to_string()),
        }
    }
}

impl PartialEq for Attribute {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key() && self.values == other.values
    }
}

impl Eq for Attribute {}

/// Lower-case an attribute name for case-insensitive lookup.
pub(crate) fn key_of(name: &str) -> String {
    name.to_lowercase()
}
