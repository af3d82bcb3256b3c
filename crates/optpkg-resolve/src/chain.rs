//! Ordered, best-effort resolution of a required extension

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use optpkg_extension::{Compatibility, Extension, extract};

use crate::archive::{JarManifestSource, ManifestSource};
use crate::context::ResolveContext;
use crate::error::{Error, Result};
use crate::resolver::ExtensionResolver;

/// Property name to resolved archive path, owned by the caller.
///
/// Each property can be assigned once; see
/// [`ResolutionChain::resolve_property`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedProperties {
    values: BTreeMap<String, PathBuf>,
}

impl ResolvedProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Path> {
        self.values.get(name).map(PathBuf::as_path)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Assign a property, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<PathBuf>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_path()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Asks a list of resolvers, in order, for an archive providing an
/// extension and returns the first acceptable candidate.
///
/// A candidate must be an existing regular file. With verification on
/// (the default), its manifest must also list an available extension
/// that classifies as [`Compatibility::Compatible`] with the requirement.
///
/// # Example
/// ```no_run
/// use optpkg_extension::Extension;
/// use optpkg_resolve::{LocationResolver, ResolutionChain, ResolveContext};
///
/// let required = Extension::builder("org.example.foo").build()?;
/// let path = ResolutionChain::new(ResolveContext::new("."))
///     .resolver(Box::new(LocationResolver::new("lib/foo.jar")))
///     .resolve(&required)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct ResolutionChain {
    context: ResolveContext,
    resolvers: Vec<Box<dyn ExtensionResolver>>,
    verify: bool,
    fail_on_error: bool,
    manifest_source: Box<dyn ManifestSource>,
}

impl ResolutionChain {
    pub fn new(context: ResolveContext) -> Self {
        Self {
            context,
            resolvers: Vec::new(),
            verify: true,
            fail_on_error: true,
            manifest_source: Box::new(JarManifestSource),
        }
    }

    /// Append a resolver to the end of the chain.
    pub fn resolver(mut self, resolver: Box<dyn ExtensionResolver>) -> Self {
        self.resolvers.push(resolver);
        self
    }

    pub fn with_resolvers(
        mut self,
        resolvers: impl IntoIterator<Item = Box<dyn ExtensionResolver>>,
    ) -> Self {
        self.resolvers.extend(resolvers);
        self
    }

    /// Check candidate manifests before accepting them.
    pub fn verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Return an error, rather than `Ok(None)`, when nothing resolves.
    pub fn fail_on_error(mut self, fail_on_error: bool) -> Self {
        self.fail_on_error = fail_on_error;
        self
    }

    pub fn manifest_source(mut self, source: Box<dyn ManifestSource>) -> Self {
        self.manifest_source = source;
        self
    }

    pub fn context(&self) -> &ResolveContext {
        &self.context
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    /// Find an archive for `required`.
    ///
    /// Returns `Ok(None)` only when every resolver failed and
    /// `fail_on_error` is off.
    pub fn resolve(&self, required: &Extension) -> Result<Option<PathBuf>> {
        for resolver in &self.resolvers {
            let candidate = match resolver.resolve(required, &self.context) {
                Ok(Some(candidate)) => candidate,
                Ok(None) => {
                    tracing::debug!(%resolver, extension = required.name(), "resolver found nothing");
                    continue;
                }
                Err(e) => {
                    tracing::warn!(%resolver, extension = required.name(), error = %e, "resolver failed");
                    continue;
                }
            };

            match self.check_candidate(&candidate, required) {
                Ok(()) => {
                    tracing::info!(
                        %resolver,
                        extension = required.name(),
                        path = %candidate.display(),
                        "resolved extension"
                    );
                    return Ok(Some(candidate));
                }
                Err(e) => {
                    tracing::warn!(%resolver, extension = required.name(), error = %e, "candidate rejected");
                }
            }
        }

        if self.fail_on_error {
            return Err(Error::ResolutionNotFound {
                name: required.name().to_string(),
            });
        }
        tracing::warn!(extension = required.name(), "unable to resolve extension");
        Ok(None)
    }

    /// Resolve `required` into `property`, unless the property is already
    /// assigned.
    pub fn resolve_property(
        &self,
        property: &str,
        required: &Extension,
        properties: &mut ResolvedProperties,
    ) -> Result<Option<PathBuf>> {
        if let Some(existing) = properties.get(property) {
            if self.fail_on_error {
                return Err(Error::PropertyAlreadySet {
                    name: property.to_string(),
                    value: existing.to_path_buf(),
                });
            }
            tracing::warn!(
                property,
                value = %existing.display(),
                "property already set, skipping resolution"
            );
            return Ok(Some(existing.to_path_buf()));
        }

        let resolved = self.resolve(required)?;
        if let Some(path) = &resolved {
            properties.set(property, path.clone());
        }
        Ok(resolved)
    }

    fn check_candidate(&self, candidate: &Path, required: &Extension) -> Result<()> {
        let reject = |reason: String| Error::CandidateRejected {
            path: candidate.to_path_buf(),
            reason,
        };

        let metadata = fs::metadata(candidate).map_err(|e| reject(e.to_string()))?;
        if !metadata.is_file() {
            return Err(reject("not a regular file".to_string()));
        }
        if !self.verify {
            return Ok(());
        }

        let manifest = self
            .manifest_source
            .open_manifest(candidate)
            .map_err(|e| reject(e.to_string()))?;
        let available = extract::available(&manifest).map_err(|e| reject(e.to_string()))?;

        let mut best = None;
        for extension in &available {
            match extension.classify(required) {
                Compatibility::Compatible => return Ok(()),
                other => {
                    best.get_or_insert(other);
                }
            }
        }
        Err(reject(match best {
            Some(result) => format!("available extension {result}"),
            None => "archive provides no extensions".to_string(),
        }))
    }
}

impl std::fmt::Debug for ResolutionChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let resolvers: Vec<String> = self.resolvers.iter().map(ToString::to_string).collect();
        f.debug_struct("ResolutionChain")
            .field("context", &self.context)
            .field("resolvers", &resolvers)
            .field("verify", &self.verify)
            .field("fail_on_error", &self.fail_on_error)
            .finish_non_exhaustive()
    }
}
