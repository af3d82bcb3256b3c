//! Command implementations for optpkg-cli

pub mod available;
pub mod display;
pub mod manifest;
pub mod resolve;

pub use available::run_available;
pub use display::run_display;
pub use manifest::run_manifest;
pub use resolve::run_resolve;

use std::path::Path;

use optpkg_extension::Extension;
use optpkg_manifest::Manifest;
use optpkg_resolve::{JarManifestSource, ManifestSource};

use crate::cli::ExtensionArgs;
use crate::error::Result;

/// Build the extension described by command-line arguments.
pub(crate) fn extension_from_args(args: &ExtensionArgs) -> Result<Extension> {
    let mut builder = Extension::builder(&args.name);
    if let Some(version) = &args.specification_version {
        builder = builder.specification_version(version);
    }
    if let Some(vendor) = &args.specification_vendor {
        builder = builder.specification_vendor(vendor);
    }
    if let Some(version) = &args.implementation_version {
        builder = builder.implementation_version(version);
    }
    if let Some(vendor) = &args.implementation_vendor {
        builder = builder.implementation_vendor(vendor);
    }
    if let Some(id) = &args.implementation_vendor_id {
        builder = builder.implementation_vendor_id(id);
    }
    if let Some(url) = &args.implementation_url {
        builder = builder.implementation_url(url);
    }
    Ok(builder.build()?)
}

/// Read the manifest of a jar file.
pub(crate) fn open_jar(path: &Path) -> Result<Manifest> {
    Ok(JarManifestSource.open_manifest(path)?)
}
