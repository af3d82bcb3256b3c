//! Error types for optpkg-extension

/// Errors that can occur while building or extracting descriptors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A version is not a dot-separated list of non-negative integers.
    #[error("invalid version '{version}'{}: {reason}", in_owner(.owner))]
    InvalidVersion {
        version: String,
        /// The extension name or specification title the version belongs to.
        owner: Option<String>,
        reason: String,
    },

    /// A descriptor was built without its identifying name.
    #[error("{what} must not be empty")]
    EmptyName { what: &'static str },

    /// A specification section lacks one of its mandatory attributes.
    #[error("missing required attribute '{attribute}' in section '{section}'")]
    MissingAttribute { attribute: String, section: String },

    #[error(transparent)]
    Manifest(#[from] optpkg_manifest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

fn in_owner(owner: &Option<String>) -> String {
    owner
        .as_deref()
        .map(|owner| format!(" in '{owner}'"))
        .unwrap_or_default()
}

impl Error {
    /// Attach the owning descriptor name to a version error.
    pub(crate) fn for_owner(self, name: &str) -> Self {
        match self {
            Self::InvalidVersion {
                version, reason, ..
            } => Self::InvalidVersion {
                version,
                owner: Some(name.to_string()),
                reason,
            },
            other => other,
        }
    }
}
