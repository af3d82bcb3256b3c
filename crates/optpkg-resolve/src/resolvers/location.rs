//! Resolver pointing at a fixed location

use std::fmt;
use std::path::PathBuf;

use optpkg_extension::Extension;

use crate::context::ResolveContext;
use crate::error::{Error, Result};
use crate::resolver::ExtensionResolver;

/// Offers a fixed file, relative to the context base directory.
#[derive(Debug, Clone)]
pub struct LocationResolver {
    location: PathBuf,
}

impl LocationResolver {
    pub fn new(location: impl Into<PathBuf>) -> Self {
        Self {
            location: location.into(),
        }
    }
}

impl fmt::Display for LocationResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Location[{}]", self.location.display())
    }
}

impl ExtensionResolver for LocationResolver {
    fn resolve(&self, _extension: &Extension, context: &ResolveContext) -> Result<Option<PathBuf>> {
        if self.location.as_os_str().is_empty() {
            return Err(Error::Resolver {
                resolver: self.to_string(),
                message: "no location specified".to_string(),
            });
        }
        Ok(Some(context.resolve_path(&self.location)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extension() -> Extension {
        Extension::builder("org.example.foo").build().unwrap()
    }

    #[test]
    fn test_resolves_against_base_dir() {
        let ctx = ResolveContext::new("/work");
        let resolved = LocationResolver::new("lib/foo.jar")
            .resolve(&extension(), &ctx)
            .unwrap();
        assert_eq!(resolved, Some(PathBuf::from("/work/lib/foo.jar")));
    }

    #[test]
    fn test_empty_location_is_error() {
        let ctx = ResolveContext::new("/work");
        let err = LocationResolver::new("")
            .resolve(&extension(), &ctx)
            .unwrap_err();
        assert!(matches!(err, Error::Resolver { .. }));
    }

    #[test]
    fn test_display() {
        assert_eq!(LocationResolver::new("a.jar").to_string(), "Location[a.jar]");
    }
}
