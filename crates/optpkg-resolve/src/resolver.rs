//! ExtensionResolver trait

use std::fmt;
use std::path::PathBuf;

use optpkg_extension::Extension;

use crate::Result;
use crate::context::ResolveContext;

/// A strategy that tries to locate an archive for a required extension.
///
/// `Ok(None)` means the strategy had nothing to offer. An error is logged
/// by the chain and the next strategy is tried. The `Display` form is used
/// in log messages.
pub trait ExtensionResolver: fmt::Display {
    fn resolve(&self, extension: &Extension, context: &ResolveContext) -> Result<Option<PathBuf>>;
}
