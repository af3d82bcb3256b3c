//! Reading the manifest of an archive.

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::Path;

use optpkg_manifest::{MANIFEST_PATH, Manifest};
use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::{Error, Result};

/// Capability to open the manifest of a file.
pub trait ManifestSource {
    /// Read and parse the manifest of the archive at `path`.
    ///
    /// Fails with [`Error::NotFound`], [`Error::NotARegularFile`] or
    /// [`Error::NoManifestPresent`] at the archive boundary.
    fn open_manifest(&self, path: &Path) -> Result<Manifest>;
}

/// Reads `META-INF/MANIFEST.MF` from a jar (zip) archive.
#[derive(Debug, Clone, Copy, Default)]
pub struct JarManifestSource;

impl ManifestSource for JarManifestSource {
    fn open_manifest(&self, path: &Path) -> Result<Manifest> {
        let metadata = fs::metadata(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::NotFound(path.to_path_buf()),
            _ => Error::file(path, e),
        })?;
        if !metadata.is_file() {
            return Err(Error::NotARegularFile(path.to_path_buf()));
        }

        let file = File::open(path).map_err(|e| Error::file(path, e))?;
        let mut archive =
            ZipArchive::new(BufReader::new(file)).map_err(|source| Error::Archive {
                path: path.to_path_buf(),
                source,
            })?;

        let entry = match archive.by_name(MANIFEST_PATH) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => {
                return Err(Error::NoManifestPresent(path.to_path_buf()));
            }
            Err(source) => {
                return Err(Error::Archive {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let manifest = Manifest::from_reader(BufReader::new(entry))?;
        tracing::debug!(
            path = %path.display(),
            sections = manifest.sections().count(),
            "read archive manifest"
        );
        Ok(manifest)
    }
}
