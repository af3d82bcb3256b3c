//! Resolve command: run a resolution config

use std::path::Path;

use optpkg_resolve::{ResolveConfig, ResolvedProperties};

use crate::error::Result;

/// Run the resolve command
pub fn run_resolve(config: &Path) -> Result<()> {
    let config = ResolveConfig::load(config)?;
    let mut properties = ResolvedProperties::new();

    match config.resolve(&mut properties)? {
        Some(path) => println!("{}", path.display()),
        None => tracing::debug!(extension = %config.extension.name, "nothing resolved"),
    }
    Ok(())
}
