//! Error types for optpkg-resolve

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Every resolver was tried and none produced an acceptable archive.
    #[error("unable to resolve extension '{name}'")]
    ResolutionNotFound { name: String },

    /// A resolver produced a file that was not accepted.
    #[error("candidate {path} rejected: {reason}")]
    CandidateRejected { path: PathBuf, reason: String },

    #[error("file not found: {0}")]
    NotFound(PathBuf),

    #[error("not a regular file: {0}")]
    NotARegularFile(PathBuf),

    #[error("no manifest present in {0}")]
    NoManifestPresent(PathBuf),

    #[error("failed to read archive {path}: {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("invalid configuration: {message}")]
    Config { message: String },

    #[error("property '{name}' is already set to {}", .value.display())]
    PropertyAlreadySet { name: String, value: PathBuf },

    /// A resolver is misconfigured for the request at hand.
    #[error("{resolver}: {message}")]
    Resolver { resolver: String, message: String },

    #[error("download failed for {url}: {reason}")]
    Download { url: String, reason: String },

    #[error("command '{command}' failed: {reason}")]
    CommandFailed { command: String, reason: String },

    #[error("manifest error: {0}")]
    Manifest(#[from] optpkg_manifest::Error),

    #[error("extension error: {0}")]
    Extension(#[from] optpkg_extension::Error),

    #[error("I/O error at {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
