//! TOML resolution configuration.
//!
//! A config file names one required extension and the resolvers to try
//! for it:
//!
//! ```toml
//! property = "foo.jar"
//! verify = true
//! fail_on_error = true
//!
//! [extension]
//! name = "org.example.foo"
//! specification-version = "1.0"
//!
//! [[resolver]]
//! type = "location"
//! location = "lib/foo.jar"
//!
//! [[resolver]]
//! type = "url"
//! url = "https://example.org/foo.jar"
//! destdir = "cache"
//! ```
//!
//! Relative paths resolve against the directory holding the config file.

use std::fs;
use std::path::{Path, PathBuf};

use optpkg_extension::Extension;
use serde::{Deserialize, Serialize};

use crate::chain::{ResolutionChain, ResolvedProperties};
use crate::context::ResolveContext;
use crate::error::{Error, Result};
use crate::resolver::ExtensionResolver;
use crate::resolvers::{CommandResolver, LocationResolver, UrlDestination, UrlResolver};

fn default_true() -> bool {
    true
}

/// A parsed resolution config.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolveConfig {
    /// Property to assign the resolved path to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,

    #[serde(default = "default_true")]
    pub verify: bool,

    #[serde(default = "default_true")]
    pub fail_on_error: bool,

    pub extension: ExtensionConfig,

    #[serde(rename = "resolver", default)]
    pub resolvers: Vec<ResolverConfig>,

    #[serde(skip)]
    base_dir: PathBuf,
}

impl ResolveConfig {
    /// Load a config file. Relative paths in it resolve against its
    /// directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::file(path, e))?;
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let config = Self::from_toml_str(&content, base_dir)
            .map_err(|e| Error::config(format!("{}: {e}", path.display())))?;
        tracing::debug!(
            path = %path.display(),
            extension = %config.extension.name,
            resolvers = config.resolvers.len(),
            "loaded resolve config"
        );
        Ok(config)
    }

    /// Parse config text, resolving relative paths against `base_dir`.
    pub fn from_toml_str(content: &str, base_dir: impl Into<PathBuf>) -> Result<Self> {
        let mut config: Self =
            toml::from_str(content).map_err(|e| Error::config(e.message().to_string()))?;
        config.base_dir = base_dir.into();
        Ok(config)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// The required extension described by `[extension]`.
    pub fn extension(&self) -> Result<Extension> {
        self.extension.to_extension()
    }

    /// Build the resolution chain described by this config.
    pub fn chain(&self) -> Result<ResolutionChain> {
        let resolvers = self
            .resolvers
            .iter()
            .map(ResolverConfig::build)
            .collect::<Result<Vec<_>>>()?;
        Ok(ResolutionChain::new(ResolveContext::new(&self.base_dir))
            .verify(self.verify)
            .fail_on_error(self.fail_on_error)
            .with_resolvers(resolvers))
    }

    /// Run the chain, assigning `property` when one is configured.
    pub fn resolve(&self, properties: &mut ResolvedProperties) -> Result<Option<PathBuf>> {
        let extension = self.extension()?;
        let chain = self.chain()?;
        match &self.property {
            Some(property) => chain.resolve_property(property, &extension, properties),
            None => chain.resolve(&extension),
        }
    }
}

/// The `[extension]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ExtensionConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specification_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specification_vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation_vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation_vendor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation_url: Option<String>,
}

impl ExtensionConfig {
    pub fn to_extension(&self) -> Result<Extension> {
        let mut builder = Extension::builder(&self.name);
        if let Some(version) = &self.specification_version {
            builder = builder.specification_version(version);
        }
        if let Some(vendor) = &self.specification_vendor {
            builder = builder.specification_vendor(vendor);
        }
        if let Some(version) = &self.implementation_version {
            builder = builder.implementation_version(version);
        }
        if let Some(vendor) = &self.implementation_vendor {
            builder = builder.implementation_vendor(vendor);
        }
        if let Some(id) = &self.implementation_vendor_id {
            builder = builder.implementation_vendor_id(id);
        }
        if let Some(url) = &self.implementation_url {
            builder = builder.implementation_url(url);
        }
        builder.build().map_err(|e| Error::config(e.to_string()))
    }
}

/// One `[[resolver]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", deny_unknown_fields)]
pub enum ResolverConfig {
    Location {
        location: String,
    },
    Url {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        destfile: Option<PathBuf>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        destdir: Option<PathBuf>,
    },
    Command {
        command: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        dir: Option<PathBuf>,
        destfile: PathBuf,
    },
}

impl ResolverConfig {
    /// Turn the entry into a resolver. Relative paths stay relative and
    /// resolve against the chain's context at resolution time.
    pub fn build(&self) -> Result<Box<dyn ExtensionResolver>> {
        let resolver: Box<dyn ExtensionResolver> = match self {
            Self::Location { location } => Box::new(LocationResolver::new(location)),
            Self::Url {
                url,
                destfile,
                destdir,
            } => {
                let destination = match (destfile, destdir) {
                    (Some(file), None) => UrlDestination::File(file.clone()),
                    (None, Some(dir)) => UrlDestination::Dir(dir.clone()),
                    _ => {
                        return Err(Error::config(format!(
                            "url resolver for {url} needs exactly one of destfile or destdir"
                        )));
                    }
                };
                Box::new(UrlResolver::new(url, destination))
            }
            Self::Command {
                command,
                dir,
                destfile,
            } => {
                let mut resolver = CommandResolver::new(command, destfile);
                if let Some(dir) = dir {
                    resolver = resolver.with_dir(dir);
                }
                Box::new(resolver)
            }
        };
        Ok(resolver)
    }
}
