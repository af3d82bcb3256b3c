//! Display command: show what jar manifests declare

use std::path::{Path, PathBuf};

use colored::Colorize;
use optpkg_extension::{Extension, Specification, extract};
use serde::Serialize;

use super::open_jar;
use crate::error::Result;

/// Everything a jar manifest declares about extensions.
#[derive(Debug, Serialize)]
struct ArchiveReport {
    path: PathBuf,
    available: Vec<Extension>,
    required: Vec<Extension>,
    optional: Vec<Extension>,
    specifications: Vec<Specification>,
}

impl ArchiveReport {
    fn load(path: &Path) -> Result<Self> {
        let manifest = open_jar(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            available: extract::available(&manifest)?,
            required: extract::required(&manifest)?,
            optional: extract::optional(&manifest)?,
            specifications: extract::specifications(&manifest)?,
        })
    }

    fn print(&self) {
        println!("{}", self.path.display().to_string().bold());
        print_group("Available extensions", &self.available);
        print_group("Required extensions", &self.required);
        print_group("Optional extensions", &self.optional);
        print_group("Specifications", &self.specifications);
    }
}

fn print_group<T: std::fmt::Display>(label: &str, items: &[T]) {
    if items.is_empty() {
        return;
    }
    println!("{}:", label.cyan().bold());
    for item in items {
        for line in item.to_string().lines() {
            println!("  {line}");
        }
        println!();
    }
}

/// Run the display command
pub fn run_display(files: &[PathBuf], json: bool) -> Result<()> {
    let reports = files
        .iter()
        .map(|path| ArchiveReport::load(path))
        .collect::<Result<Vec<_>>>()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    for report in &reports {
        report.print();
    }
    Ok(())
}
