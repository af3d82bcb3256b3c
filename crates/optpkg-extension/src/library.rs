//! Library manifests: declare an extension and its dependencies.

use std::path::Path;

use optpkg_manifest::Manifest;

use crate::error::Result;
use crate::extension::Extension;
use crate::{EXTENSION_LIST, OPTIONAL_EXTENSION_LIST};

const TOKEN_PREFIX: &str = "lib";

/// Builder for a manifest that declares one extension together with the
/// extensions it requires and optionally uses.
///
/// Dependencies are listed under the tokens `lib0`, `lib1`, ... numbered
/// across required then optional extensions, and each is written with the
/// matching `libN-` attribute prefix.
///
/// # Example
/// ```
/// use optpkg_extension::{Extension, LibraryManifest, extract};
///
/// let own = Extension::builder("org.example.app").build().unwrap();
/// let dep = Extension::builder("org.example.lib")
///     .specification_version("1.0")
///     .build()
///     .unwrap();
/// let manifest = LibraryManifest::new(own).require(dep.clone()).build();
///
/// assert_eq!(extract::required(&manifest).unwrap(), vec![dep]);
/// ```
#[derive(Debug, Clone)]
pub struct LibraryManifest {
    extension: Extension,
    created_by: String,
    required: Vec<Extension>,
    optional: Vec<Extension>,
}

impl LibraryManifest {
    pub fn new(extension: Extension) -> Self {
        Self {
            extension,
            created_by: format!("optpkg {}", env!("CARGO_PKG_VERSION")),
            required: Vec::new(),
            optional: Vec::new(),
        }
    }

    /// Override the `Created-By` attribute.
    pub fn created_by(mut self, created_by: impl Into<String>) -> Self {
        self.created_by = created_by.into();
        self
    }

    pub fn require(mut self, extension: Extension) -> Self {
        self.required.push(extension);
        self
    }

    pub fn optional(mut self, extension: Extension) -> Self {
        self.optional.push(extension);
        self
    }

    /// Assemble the manifest.
    pub fn build(&self) -> Manifest {
        let mut manifest = Manifest::with_created_by(&self.created_by);
        let main = manifest.main_section_mut();
        self.extension.write_to(main, "");

        let mut next = 0;
        for (list, members) in [
            (EXTENSION_LIST, &self.required),
            (OPTIONAL_EXTENSION_LIST, &self.optional),
        ] {
            if members.is_empty() {
                continue;
            }
            let tokens: Vec<String> = (next..next + members.len())
                .map(|i| format!("{TOKEN_PREFIX}{i}"))
                .collect();
            main.insert(list, tokens.join(" "));
            for (token, member) in tokens.iter().zip(members) {
                member.write_to(main, &format!("{token}-"));
            }
            next += members.len();
        }

        tracing::debug!(
            extension = self.extension.name(),
            required = self.required.len(),
            optional = self.optional.len(),
            "built library manifest"
        );
        manifest
    }

    /// Build the manifest and write it to `path`.
    pub fn write_to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        self.build().write_to_path(path, false)?;
        Ok(())
    }
}
