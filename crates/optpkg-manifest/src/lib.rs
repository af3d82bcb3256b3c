//! Manifest text format for optpkg.
//!
//! A manifest is a list of `Name: value` attributes grouped into sections
//! separated by blank lines. The first section is the unnamed main section;
//! every following section starts with a `Name` attribute.
//!
//! ```text
//! Manifest-Version: 1.0
//! Extension-Name: org.example.widgets
//! Specification-Version: 1.2
//!
//! Name: org/example/widgets/
//! Specification-Title: Widgets
//! ```
//!
//! Lines longer than 72 bytes (70 bytes plus the line terminator) are
//! wrapped onto continuation lines that start with a single space.
//!
//! # Modules
//!
//! - [`attribute`]: a single named, possibly multi-valued attribute
//! - [`section`]: an ordered, case-insensitive attribute store
//! - [`manifest`]: the whole document plus merging
//! - [`parser`]: text to [`Manifest`]
//! - [`writer`]: [`Manifest`] to text, including line wrapping

pub mod attribute;
pub mod error;
pub mod manifest;
pub mod parser;
pub mod section;
pub mod writer;

/// Path of the manifest entry inside a jar archive.
pub const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";

/// The attribute holding the manifest format version in the main section.
pub const ATTRIBUTE_MANIFEST_VERSION: &str = "Manifest-Version";

/// The signature version attribute, always written right after the
/// manifest version.
pub const ATTRIBUTE_SIGNATURE_VERSION: &str = "Signature-Version";

/// The attribute that opens every named section.
pub const ATTRIBUTE_NAME: &str = "Name";

/// Attributes whose name starts with this prefix are not allowed.
pub const ATTRIBUTE_FROM: &str = "From";

/// The only attribute that may be supplied more than once in a section.
pub const ATTRIBUTE_CLASSPATH: &str = "Class-Path";

/// The version used when a manifest does not declare one.
pub const DEFAULT_MANIFEST_VERSION: &str = "1.0";

pub use attribute::Attribute;
pub use error::{Error, Result};
pub use manifest::Manifest;
pub use section::Section;
