//! Package specification descriptors.
//!
//! A [`Specification`] records which specification a set of archive
//! entries implements and whose implementation they are. Unlike
//! [`crate::Extension`], the implementation version is an opaque string
//! compared by equality.

use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::extension::parse_version;
use crate::version::VersionNumber;
use crate::{
    IMPLEMENTATION_TITLE, IMPLEMENTATION_VENDOR, IMPLEMENTATION_VERSION, SPECIFICATION_TITLE,
    SPECIFICATION_VENDOR, SPECIFICATION_VERSION,
};

/// Result of comparing a specification against another one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecificationCompatibility {
    Compatible,
    RequireSpecificationUpgrade,
    RequireVendorSwitch,
    RequireImplementationChange,
    Incompatible,
}

impl fmt::Display for SpecificationCompatibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Compatible => "compatible",
            Self::RequireSpecificationUpgrade => "requires specification upgrade",
            Self::RequireVendorSwitch => "requires vendor switch",
            Self::RequireImplementationChange => "requires implementation change",
            Self::Incompatible => "incompatible",
        };
        f.write_str(text)
    }
}

/// A package specification and the archive sections it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Specification {
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    specification_version: Option<VersionNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    specification_vendor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    implementation_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    implementation_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    implementation_vendor: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    sections: Vec<String>,
}

impl Specification {
    pub fn builder(title: impl Into<String>) -> SpecificationBuilder {
        SpecificationBuilder::new(title)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn specification_version(&self) -> Option<&VersionNumber> {
        self.specification_version.as_ref()
    }

    pub fn specification_vendor(&self) -> Option<&str> {
        self.specification_vendor.as_deref()
    }

    pub fn implementation_title(&self) -> Option<&str> {
        self.implementation_title.as_deref()
    }

    pub fn implementation_version(&self) -> Option<&str> {
        self.implementation_version.as_deref()
    }

    pub fn implementation_vendor(&self) -> Option<&str> {
        self.implementation_vendor.as_deref()
    }

    /// Names of the archive sections this specification applies to, in
    /// first-seen order. Empty when it is not tied to any entry.
    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    /// Compare this specification against `other`.
    ///
    /// Titles must match exactly. Then, for each field set here: the
    /// specification version of `other` must be at least ours, the
    /// implementation vendor must be equal and the implementation version
    /// must be string-equal.
    pub fn compatibility_with(&self, other: &Specification) -> SpecificationCompatibility {
        if self.title != other.title {
            return SpecificationCompatibility::Incompatible;
        }

        if let Some(ours) = &self.specification_version {
            if !other
                .specification_version
                .as_ref()
                .is_some_and(|theirs| ours >= theirs)
            {
                return SpecificationCompatibility::RequireSpecificationUpgrade;
            }
        }

        if let Some(ours) = &self.implementation_vendor {
            if other.implementation_vendor.as_ref() != Some(ours) {
                return SpecificationCompatibility::RequireVendorSwitch;
            }
        }

        if let Some(ours) = &self.implementation_version {
            if other.implementation_version.as_ref() != Some(ours) {
                return SpecificationCompatibility::RequireImplementationChange;
            }
        }

        SpecificationCompatibility::Compatible
    }

    pub fn is_compatible_with(&self, other: &Specification) -> bool {
        self.compatibility_with(other) == SpecificationCompatibility::Compatible
    }

    /// Whether both describe the same specification, ignoring sections.
    pub fn same_identity(&self, other: &Specification) -> bool {
        self.title == other.title
            && self.specification_version == other.specification_version
            && self.specification_vendor == other.specification_vendor
            && self.implementation_title == other.implementation_title
            && self.implementation_version == other.implementation_version
            && self.implementation_vendor == other.implementation_vendor
    }

    /// Collapse a group of same-identity specifications into one record
    /// holding the ordered union of their sections.
    pub(crate) fn merge_group(group: Vec<Specification>) -> Option<Specification> {
        let mut records = group.into_iter();
        let first = records.next()?;
        let sections = records.fold(first.sections.clone(), |mut sections, record| {
            for section in record.sections {
                if !sections.contains(&section) {
                    sections.push(section);
                }
            }
            sections
        });
        Some(Specification { sections, ..first })
    }
}

impl fmt::Display for Specification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{SPECIFICATION_TITLE}: {}", self.title)?;
        if let Some(version) = &self.specification_version {
            writeln!(f, "{SPECIFICATION_VERSION}: {version}")?;
        }
        if let Some(vendor) = &self.specification_vendor {
            writeln!(f, "{SPECIFICATION_VENDOR}: {vendor}")?;
        }
        if let Some(title) = &self.implementation_title {
            writeln!(f, "{IMPLEMENTATION_TITLE}: {title}")?;
        }
        if let Some(version) = &self.implementation_version {
            writeln!(f, "{IMPLEMENTATION_VERSION}: {version}")?;
        }
        if let Some(vendor) = &self.implementation_vendor {
            writeln!(f, "{IMPLEMENTATION_VENDOR}: {vendor}")?;
        }
        for section in &self.sections {
            writeln!(f, "Section: {section}")?;
        }
        Ok(())
    }
}

/// Builder for [`Specification`].
#[derive(Debug, Clone, Default)]
pub struct SpecificationBuilder {
    title: String,
    specification_version: Option<String>,
    specification_vendor: Option<String>,
    implementation_title: Option<String>,
    implementation_version: Option<String>,
    implementation_vendor: Option<String>,
    sections: Vec<String>,
}

impl SpecificationBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn specification_version(mut self, version: impl Into<String>) -> Self {
        self.specification_version = Some(version.into());
        self
    }

    pub fn specification_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.specification_vendor = Some(vendor.into());
        self
    }

    pub fn implementation_title(mut self, title: impl Into<String>) -> Self {
        self.implementation_title = Some(title.into());
        self
    }

    pub fn implementation_version(mut self, version: impl Into<String>) -> Self {
        self.implementation_version = Some(version.into());
        self
    }

    pub fn implementation_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.implementation_vendor = Some(vendor.into());
        self
    }

    /// Tie the specification to an archive section. Repeats are ignored.
    pub fn section(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.sections.contains(&name) {
            self.sections.push(name);
        }
        self
    }

    pub fn build(self) -> Result<Specification> {
        if self.title.is_empty() {
            return Err(Error::EmptyName {
                what: "specification title",
            });
        }
        let specification_version = parse_version(self.specification_version, &self.title)?;

        Ok(Specification {
            title: self.title,
            specification_version,
            specification_vendor: self.specification_vendor,
            implementation_title: self.implementation_title,
            implementation_version: self.implementation_version,
            implementation_vendor: self.implementation_vendor,
            sections: self.sections,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn spec(title: &str) -> SpecificationBuilder {
        Specification::builder(title)
    }

    #[test]
    fn test_build_rejects_empty_title() {
        assert!(matches!(
            spec("").build(),
            Err(Error::EmptyName { .. })
        ));
    }

    #[test]
    fn test_implementation_version_is_opaque() {
        let s = spec("Widgets")
            .implementation_version("build 42-beta")
            .build()
            .unwrap();
        assert_eq!(s.implementation_version(), Some("build 42-beta"));
    }

    #[test]
    fn test_sections_deduplicated_in_order() {
        let s = spec("Widgets")
            .section("b/")
            .section("a/")
            .section("b/")
            .build()
            .unwrap();
        assert_eq!(s.sections(), ["b/", "a/"]);
    }

    #[test]
    fn test_compatibility() {
        let ours = spec("Widgets")
            .specification_version("1.2")
            .implementation_vendor("Example")
            .implementation_version("1.0.0")
            .build()
            .unwrap();

        let same = ours.clone();
        assert_eq!(ours.compatibility_with(&same), SpecificationCompatibility::Compatible);

        let other_title = spec("Gadgets").build().unwrap();
        assert_eq!(
            ours.compatibility_with(&other_title),
            SpecificationCompatibility::Incompatible
        );

        let newer = spec("Widgets")
            .specification_version("1.3")
            .implementation_vendor("Example")
            .implementation_version("1.0.0")
            .build()
            .unwrap();
        assert_eq!(
            ours.compatibility_with(&newer),
            SpecificationCompatibility::RequireSpecificationUpgrade
        );

        let other_vendor = spec("Widgets")
            .specification_version("1.2")
            .implementation_vendor("Other")
            .build()
            .unwrap();
        assert_eq!(
            ours.compatibility_with(&other_vendor),
            SpecificationCompatibility::RequireVendorSwitch
        );

        let padded_impl = spec("Widgets")
            .specification_version("1.2.0")
            .implementation_vendor("Example")
            .implementation_version("1.0")
            .build()
            .unwrap();
        assert_eq!(
            ours.compatibility_with(&padded_impl),
            SpecificationCompatibility::RequireImplementationChange
        );
    }

    #[test]
    fn test_merge_group_unions_sections() {
        let a = spec("W").section("a/").build().unwrap();
        let b = spec("W").section("b/").section("a/").build().unwrap();
        let merged = Specification::merge_group(vec![a, b]).unwrap();
        assert_eq!(merged.sections(), ["a/", "b/"]);
        assert!(Specification::merge_group(Vec::new()).is_none());
    }

    #[test]
    fn test_same_identity_ignores_sections() {
        let a = spec("W").specification_version("1").section("a/").build().unwrap();
        let b = spec("W").specification_version("1.0").section("b/").build().unwrap();
        assert!(a.same_identity(&b));
        assert_ne!(a, b);
    }
}
