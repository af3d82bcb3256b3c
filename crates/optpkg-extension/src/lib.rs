//! Optional-package descriptors for optpkg.
//!
//! This crate provides the version model, the two dependency descriptors
//! found in jar manifests ([`Extension`] and [`Specification`]), the
//! routines that extract them from a parsed [`optpkg_manifest::Manifest`],
//! and a builder for library manifests that declare dependencies.

pub mod error;
pub mod extension;
pub mod extract;
pub mod library;
pub mod specification;
pub mod version;

/// Space-separated list of required extension tokens.
pub const EXTENSION_LIST: &str = "Extension-List";
/// Space-separated list of optional extension tokens.
pub const OPTIONAL_EXTENSION_LIST: &str = "Optional-Extension-List";
pub const EXTENSION_NAME: &str = "Extension-Name";
pub const SPECIFICATION_TITLE: &str = "Specification-Title";
pub const SPECIFICATION_VERSION: &str = "Specification-Version";
pub const SPECIFICATION_VENDOR: &str = "Specification-Vendor";
pub const IMPLEMENTATION_TITLE: &str = "Implementation-Title";
pub const IMPLEMENTATION_VERSION: &str = "Implementation-Version";
pub const IMPLEMENTATION_VENDOR: &str = "Implementation-Vendor";
pub const IMPLEMENTATION_VENDOR_ID: &str = "Implementation-Vendor-Id";
pub const IMPLEMENTATION_URL: &str = "Implementation-URL";

pub use error::{Error, Result};
pub use extension::{Compatibility, Extension, ExtensionBuilder};
pub use library::LibraryManifest;
pub use specification::{Specification, SpecificationBuilder, SpecificationCompatibility};
pub use version::VersionNumber;
