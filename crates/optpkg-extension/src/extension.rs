//! The "optional package" extension descriptor.
//!
//! An [`Extension`] names a dependency and optionally pins the
//! specification and implementation it must provide. [`Extension::classify`]
//! compares an available extension against a required one.

use std::fmt;

use optpkg_manifest::Section;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::version::VersionNumber;
use crate::{
    EXTENSION_NAME, IMPLEMENTATION_URL, IMPLEMENTATION_VENDOR, IMPLEMENTATION_VENDOR_ID,
    IMPLEMENTATION_VERSION, SPECIFICATION_VENDOR, SPECIFICATION_VERSION,
};

/// Result of comparing an available extension against a requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Compatibility {
    /// The available extension satisfies the requirement.
    Compatible,
    /// The specification version is missing or too old.
    RequireSpecificationUpgrade,
    /// The implementation comes from a different vendor.
    RequireVendorSwitch,
    /// The implementation version is missing or too old.
    RequireImplementationUpgrade,
    /// The extension names differ.
    Incompatible,
}

impl fmt::Display for Compatibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Compatible => "compatible",
            Self::RequireSpecificationUpgrade => "requires specification upgrade",
            Self::RequireVendorSwitch => "requires vendor switch",
            Self::RequireImplementationUpgrade => "requires implementation upgrade",
            Self::Incompatible => "incompatible",
        };
        f.write_str(text)
    }
}

/// An optional-package extension.
///
/// Every field except the name may be absent. An absent field is distinct
/// from one present with an empty value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Extension {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    specification_version: Option<VersionNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    specification_vendor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    implementation_version: Option<VersionNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    implementation_vendor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    implementation_vendor_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    implementation_url: Option<String>,
}

impl Extension {
    /// Start building an extension with the given name.
    pub fn builder(name: impl Into<String>) -> ExtensionBuilder {
        ExtensionBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn specification_version(&self) -> Option<&VersionNumber> {
        self.specification_version.as_ref()
    }

    pub fn specification_vendor(&self) -> Option<&str> {
        self.specification_vendor.as_deref()
    }

    pub fn implementation_version(&self) -> Option<&VersionNumber> {
        self.implementation_version.as_ref()
    }

    pub fn implementation_vendor(&self) -> Option<&str> {
        self.implementation_vendor.as_deref()
    }

    pub fn implementation_vendor_id(&self) -> Option<&str> {
        self.implementation_vendor_id.as_deref()
    }

    pub fn implementation_url(&self) -> Option<&str> {
        self.implementation_url.as_deref()
    }

    /// Classify this (available) extension against a `required` one.
    ///
    /// Checks run in a fixed order and the first failing check decides:
    /// name, specification version, vendor id, implementation version.
    /// Names compare case-sensitively.
    pub fn classify(&self, required: &Extension) -> Compatibility {
        if self.name != required.name {
            return Compatibility::Incompatible;
        }

        if let Some(wanted) = &required.specification_version {
            if !self
                .specification_version
                .as_ref()
                .is_some_and(|have| have >= wanted)
            {
                return Compatibility::RequireSpecificationUpgrade;
            }
        }

        if let Some(wanted) = &required.implementation_vendor_id {
            if self.implementation_vendor_id.as_ref() != Some(wanted) {
                return Compatibility::RequireVendorSwitch;
            }
        }

        if let Some(wanted) = &required.implementation_version {
            if !self
                .implementation_version
                .as_ref()
                .is_some_and(|have| have >= wanted)
            {
                return Compatibility::RequireImplementationUpgrade;
            }
        }

        Compatibility::Compatible
    }

    /// Whether this extension fully satisfies `required`.
    pub fn is_compatible_with(&self, required: &Extension) -> bool {
        self.classify(required) == Compatibility::Compatible
    }

    /// Write this extension's attributes into `section`, each key prefixed
    /// with `prefix` (`""` for the declaring archive, `"lib0-"` and so on
    /// for list members). Existing attributes with the same keys are
    /// replaced.
    pub fn write_to(&self, section: &mut Section, prefix: &str) {
        let fields = [
            (EXTENSION_NAME, Some(self.name.clone())),
            (SPECIFICATION_VENDOR, self.specification_vendor.clone()),
            (
                SPECIFICATION_VERSION,
                self.specification_version.as_ref().map(ToString::to_string),
            ),
            (IMPLEMENTATION_VENDOR_ID, self.implementation_vendor_id.clone()),
            (IMPLEMENTATION_VENDOR, self.implementation_vendor.clone()),
            (
                IMPLEMENTATION_VERSION,
                self.implementation_version.as_ref().map(ToString::to_string),
            ),
            (IMPLEMENTATION_URL, self.implementation_url.clone()),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                section.insert(format!("{prefix}{key}"), value);
            }
        }
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{EXTENSION_NAME}: {}", self.name)?;
        if let Some(version) = &self.specification_version {
            writeln!(f, "{SPECIFICATION_VERSION}: {version}")?;
        }
        if let Some(vendor) = &self.specification_vendor {
            writeln!(f, "{SPECIFICATION_VENDOR}: {vendor}")?;
        }
        if let Some(version) = &self.implementation_version {
            writeln!(f, "{IMPLEMENTATION_VERSION}: {version}")?;
        }
        if let Some(id) = &self.implementation_vendor_id {
            writeln!(f, "{IMPLEMENTATION_VENDOR_ID}: {id}")?;
        }
        if let Some(vendor) = &self.implementation_vendor {
            writeln!(f, "{IMPLEMENTATION_VENDOR}: {vendor}")?;
        }
        if let Some(url) = &self.implementation_url {
            writeln!(f, "{IMPLEMENTATION_URL}: {url}")?;
        }
        Ok(())
    }
}

/// Builder for [`Extension`] taking versions as text.
///
/// # Example
/// ```
/// use optpkg_extension::{Compatibility, Extension};
///
/// let available = Extension::builder("org.example.foo")
///     .specification_version("1.0")
///     .build()
///     .unwrap();
/// let required = Extension::builder("org.example.foo")
///     .specification_version("2.0")
///     .build()
///     .unwrap();
/// assert_eq!(
///     available.classify(&required),
///     Compatibility::RequireSpecificationUpgrade
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExtensionBuilder {
    name: String,
    specification_version: Option<String>,
    specification_vendor: Option<String>,
    implementation_version: Option<String>,
    implementation_vendor: Option<String>,
    implementation_vendor_id: Option<String>,
    implementation_url: Option<String>,
}

impl ExtensionBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
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

    pub fn implementation_version(mut self, version: impl Into<String>) -> Self {
        self.implementation_version = Some(version.into());
        self
    }

    pub fn implementation_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.implementation_vendor = Some(vendor.into());
        self
    }

    pub fn implementation_vendor_id(mut self, id: impl Into<String>) -> Self {
        self.implementation_vendor_id = Some(id.into());
        self
    }

    pub fn implementation_url(mut self, url: impl Into<String>) -> Self {
        self.implementation_url = Some(url.into());
        self
    }

    /// Validate and build the extension.
    ///
    /// Fails when the name is empty or a version is malformed.
    pub fn build(self) -> Result<Extension> {
        if self.name.is_empty() {
            return Err(Error::EmptyName {
                what: "extension name",
            });
        }
        let specification_version = parse_version(self.specification_version, &self.name)?;
        let implementation_version = parse_version(self.implementation_version, &self.name)?;

        Ok(Extension {
            name: self.name,
            specification_version,
            specification_vendor: self.specification_vendor,
            implementation_version,
            implementation_vendor: self.implementation_vendor,
            implementation_vendor_id: self.implementation_vendor_id,
            implementation_url: self.implementation_url,
        })
    }
}

pub(crate) fn parse_version(text: Option<String>, owner: &str) -> Result<Option<VersionNumber>> {
    text.map(|text| VersionNumber::parse(&text).map_err(|e| e.for_owner(owner)))
        .transpose()
}
