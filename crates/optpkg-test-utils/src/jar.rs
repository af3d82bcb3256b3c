//! [`TestJar`] builder for archive-based test scenarios.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use zip::write::SimpleFileOptions;

const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";

/// A jar archive to be written for a test.
///
/// # Example
///
/// ```rust,no_run
/// use optpkg_test_utils::{JarDir, TestJar};
///
/// let dir = JarDir::new();
/// let jar = dir.write("foo.jar", &TestJar::extension("org.example.foo", Some("1.0")));
/// assert!(jar.is_file());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TestJar {
    manifest: Option<String>,
    entries: Vec<(String, Vec<u8>)>,
}

impl TestJar {
    /// An archive with no manifest entry.
    pub fn new() -> Self {
        Self::default()
    }

    /// An archive whose `META-INF/MANIFEST.MF` holds `text` verbatim.
    pub fn with_manifest(text: impl Into<String>) -> Self {
        Self {
            manifest: Some(text.into()),
            entries: Vec::new(),
        }
    }

    /// An archive declaring a single extension in its main section.
    pub fn extension(name: &str, specification_version: Option<&str>) -> Self {
        let mut text = format!("Manifest-Version: 1.0\r\nExtension-Name: {name}\r\n");
        if let Some(version) = specification_version {
            text.push_str(&format!("Specification-Version: {version}\r\n"));
        }
        text.push_str("\r\n");
        Self::with_manifest(text)
    }

    /// Add an extra entry to the archive.
    pub fn entry(mut self, name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        self.entries.push((name.into(), contents.into()));
        self
    }

    /// Write the archive to `path`.
    ///
    /// # Panics
    /// Panics if the archive cannot be written.
    pub fn write_to(&self, path: &Path) {
        let file = fs::File::create(path)
            .unwrap_or_else(|e| panic!("TestJar: cannot create {}: {e}", path.display()));
        let mut zip = zip::ZipWriter::new(file);
        let options = SimpleFileOptions::default();

        let manifest = self
            .manifest
            .as_ref()
            .map(|text| (MANIFEST_PATH.to_string(), text.as_bytes().to_vec()));
        for (name, contents) in manifest.iter().chain(self.entries.iter()) {
            zip.start_file(name.as_str(), options)
                .expect("TestJar: failed to start entry");
            zip.write_all(contents)
                .expect("TestJar: failed to write entry");
        }
        zip.finish().expect("TestJar: failed to finish archive");
    }
}

/// A temporary directory holding test jars and other fixtures.
pub struct JarDir {
    temp_dir: TempDir,
}

impl Default for JarDir {
    fn default() -> Self {
        Self::new()
    }
}

impl JarDir {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("JarDir: failed to create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `name` inside the directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.root().join(name)
    }

    /// Write `jar` as `name`, creating parent directories, and return its path.
    pub fn write(&self, name: &str, jar: &TestJar) -> PathBuf {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("JarDir: failed to create parent");
        }
        jar.write_to(&path);
        path
    }

    /// Write a plain file and return its path.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("JarDir: failed to create parent");
        }
        fs::write(&path, contents).expect("JarDir: failed to write file");
        path
    }
}
