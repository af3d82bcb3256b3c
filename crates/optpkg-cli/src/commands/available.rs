//! Available command: check a jar against a required extension

use std::path::Path;

use colored::Colorize;
use optpkg_extension::{Compatibility, Extension, extract};

use super::{extension_from_args, open_jar};
use crate::cli::ExtensionArgs;
use crate::error::{CliError, Result};

/// How close a result is to satisfying the requirement. Classification
/// checks name, specification version, vendor id and implementation
/// version in that order, so failing a later check means more matched.
fn closeness(result: Compatibility) -> u8 {
    match result {
        Compatibility::Incompatible => 0,
        Compatibility::RequireSpecificationUpgrade => 1,
        Compatibility::RequireVendorSwitch => 2,
        Compatibility::RequireImplementationUpgrade => 3,
        Compatibility::Compatible => 4,
    }
}

/// The best classification of any available extension, with the
/// extension that produced it.
fn best_match<'a>(
    available: &'a [Extension],
    required: &Extension,
) -> Option<(&'a Extension, Compatibility)> {
    available
        .iter()
        .map(|extension| (extension, extension.classify(required)))
        .max_by_key(|(_, result)| closeness(*result))
}

/// Run the available command
pub fn run_available(file: &Path, requirement: &ExtensionArgs) -> Result<()> {
    let required = extension_from_args(requirement)?;
    let manifest = open_jar(file)?;
    let available = extract::available(&manifest)?;

    match best_match(&available, &required) {
        Some((_, Compatibility::Compatible)) => {
            println!(
                "{} {} provides {}",
                "compatible:".green().bold(),
                file.display(),
                required.name()
            );
            Ok(())
        }
        Some((extension, result)) => Err(CliError::user(format!(
            "{} does not provide {}: {} {result}",
            file.display(),
            required.name(),
            extension.name()
        ))),
        None => Err(CliError::user(format!(
            "{} declares no extensions",
            file.display()
        ))),
    }
}
