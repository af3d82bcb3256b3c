//! Error types for optpkg-manifest

use std::path::PathBuf;

/// Result type for manifest operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading, building or writing a manifest
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(
        "manifest line \"{line}\" is not valid as it does not contain a name and a value separated by ': '"
    )]
    MissingSeparator { line: String },

    #[error("manifest sections should start with a \"Name\" attribute and not \"{found}\"")]
    SectionMissingName { found: String },

    #[error("can't start an attribute with a continuation line: \"{line}\"")]
    ContinuationWithoutAttribute { line: String },

    #[error("the attribute \"{name}\" may not occur more than once in the same section")]
    DuplicateAttribute { name: String },

    #[error("unable to write manifest line {name}: {value}")]
    LineOverflow { name: String, value: String },

    #[error(
        "specify the section name when creating the section rather than using a \"Name\" attribute"
    )]
    NameAttributeNotAllowed,

    #[error("sections must have a name")]
    UnnamedSection,

    #[error("unable to merge sections with different names: {ours:?} and {theirs:?}")]
    SectionNameMismatch {
        ours: Option<String>,
        theirs: Option<String>,
    },

    #[error("I/O error at {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }

    /// Whether this error describes malformed manifest text.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::MissingSeparator { .. }
                | Self::SectionMissingName { .. }
                | Self::ContinuationWithoutAttribute { .. }
                | Self::DuplicateAttribute { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_separator_display() {
        let err = Error::MissingSeparator {
            line: "NoColonHere".to_string(),
        };
        assert!(err.to_string().contains("NoColonHere"));
        assert!(err.to_string().contains("': '"));
        assert!(err.is_format_error());
    }

    #[test]
    fn test_overflow_is_not_format_error() {
        let err = Error::LineOverflow {
            name: "x".repeat(71),
            value: "v".to_string(),
        };
        assert!(!err.is_format_error());
    }
}
