//! Extension resolution for optpkg.
//!
//! A [`ResolutionChain`] turns a required [`optpkg_extension::Extension`]
//! into a concrete archive on disk by asking a list of
//! [`ExtensionResolver`] strategies in order, optionally verifying each
//! candidate's manifest before accepting it.

pub mod archive;
pub mod chain;
pub mod config;
pub mod context;
pub mod error;
pub mod resolver;
pub mod resolvers;

pub use archive::{JarManifestSource, ManifestSource};
pub use chain::{ResolutionChain, ResolvedProperties};
pub use config::{ExtensionConfig, ResolveConfig, ResolverConfig};
pub use context::ResolveContext;
pub use error::{Error, Result};
pub use resolver::ExtensionResolver;
pub use resolvers::{CommandResolver, LocationResolver, UrlDestination, UrlResolver};
