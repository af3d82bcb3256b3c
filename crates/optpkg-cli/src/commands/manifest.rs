//! Manifest command: write a library manifest

use std::path::{Path, PathBuf};

use colored::Colorize;
use optpkg_extension::{Extension, LibraryManifest, extract};

use super::{extension_from_args, open_jar};
use crate::cli::ExtensionArgs;
use crate::error::Result;

/// Collect the available extensions of each jar, in order.
fn available_in(jars: &[PathBuf]) -> Result<Vec<Extension>> {
    let mut extensions = Vec::new();
    for jar in jars {
        let found = extract::available(&open_jar(jar)?)?;
        if found.is_empty() {
            tracing::warn!(jar = %jar.display(), "dependency declares no extensions");
        }
        extensions.extend(found);
    }
    Ok(extensions)
}

/// Run the manifest command
pub fn run_manifest(
    out: &Path,
    extension: &ExtensionArgs,
    depends: &[PathBuf],
    optional: &[PathBuf],
    created_by: Option<&str>,
) -> Result<()> {
    let mut library = LibraryManifest::new(extension_from_args(extension)?);
    if let Some(created_by) = created_by {
        library = library.created_by(created_by);
    }
    for required in available_in(depends)? {
        library = library.require(required);
    }
    for optional in available_in(optional)? {
        library = library.optional(optional);
    }

    library.write_to_path(out)?;
    println!("{} {}", "Wrote".green().bold(), out.display());
    Ok(())
}
