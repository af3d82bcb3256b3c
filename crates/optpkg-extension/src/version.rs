//! Dotted ("Dewey decimal") version numbers.
//!
//! A version is a sequence of non-negative integers separated by dots.
//! Comparison pads the shorter version with zeros, so `1.2` and `1.2.0`
//! are equal and `1.0` is less than `1.0.1`.
//!
//! # Examples
//!
//! ```
//! use optpkg_extension::VersionNumber;
//!
//! let a: VersionNumber = "1.2".parse().unwrap();
//! let b: VersionNumber = "1.2.0".parse().unwrap();
//! assert_eq!(a, b);
//! assert_eq!(a.to_string(), "1.2");
//! assert!(a < "1.10".parse().unwrap());
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// An immutable dotted version number.
#[derive(Debug, Clone)]
pub struct VersionNumber {
    components: Vec<u64>,
}

impl VersionNumber {
    /// Parse a dotted version.
    ///
    /// Every dot-separated token must be a non-empty run of ASCII digits.
    /// Empty strings, leading, doubled or trailing dots, signs and other
    /// characters are rejected.
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidVersion {
            version: text.to_string(),
            owner: None,
            reason,
        };

        let components = text
            .split('.')
            .map(|token| {
                if token.is_empty() {
                    return Err(invalid("empty component".to_string()));
                }
                if !token.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid(format!("non-numeric component '{token}'")));
                }
                token
                    .parse::<u64>()
                    .map_err(|_| invalid(format!("component '{token}' is out of range")))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { components })
    }

    /// Build a version directly from its components.
    ///
    /// At least one component is required, so that the result displays as
    /// text [`VersionNumber::parse`] accepts.
    pub fn from_components(components: Vec<u64>) -> Result<Self> {
        if components.is_empty() {
            return Err(Error::InvalidVersion {
                version: String::new(),
                owner: None,
                reason: "no components".to_string(),
            });
        }
        Ok(Self { components })
    }

    pub fn components(&self) -> &[u64] {
        &self.components
    }

    /// Number of components as written, trailing zeros included.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// The component at `index`, if written.
    pub fn get(&self, index: usize) -> Option<u64> {
        self.components.get(index).copied()
    }

    pub fn is_equal(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }

    pub fn is_greater_than(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Greater
    }

    pub fn is_greater_than_or_equal(&self, other: &Self) -> bool {
        self.cmp(other) != Ordering::Less
    }

    pub fn is_less_than(&self, other: &Self) -> bool {
        !self.is_greater_than_or_equal(other)
    }

    pub fn is_less_than_or_equal(&self, other: &Self) -> bool {
        !self.is_greater_than(other)
    }

    /// Components with trailing zeros removed; equal versions share this.
    fn significant(&self) -> &[u64] {
        let end = self
            .components
            .iter()
            .rposition(|&c| c != 0)
            .map_or(0, |i| i + 1);
        &self.components[..end]
    }
}

impl Ord for VersionNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        (0..len)
            .map(|i| {
                let ours = self.get(i).unwrap_or(0);
                let theirs = other.get(i).unwrap_or(0);
                ours.cmp(&theirs)
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for VersionNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for VersionNumber {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal(other)
    }
}

impl Eq for VersionNumber {}

impl Hash for VersionNumber {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.significant().hash(state);
    }
}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{component}")?;
        }
        Ok(())
    }
}

impl FromStr for VersionNumber {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for VersionNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for VersionNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
