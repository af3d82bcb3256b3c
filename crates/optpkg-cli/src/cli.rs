//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// optpkg - Inspect and resolve optional package extensions in jar manifests
#[derive(Parser, Debug)]
#[command(name = "optpkg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show the extensions and specifications declared by jar files
    Display {
        /// Jar files to inspect
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Check whether a jar provides a required extension
    ///
    /// Exits with a non-zero status unless one of the jar's extensions
    /// is compatible with the requirement.
    ///
    /// Examples:
    ///   optpkg available lib/foo.jar --name org.example.foo
    ///   optpkg available lib/foo.jar --name org.example.foo --specification-version 1.2
    Available {
        /// Jar file to check
        file: PathBuf,

        #[command(flatten)]
        requirement: ExtensionArgs,
    },

    /// Resolve an extension using a TOML resolution config
    Resolve {
        /// Path to the resolution config
        #[arg(env = "OPTPKG_RESOLVE_CONFIG")]
        config: PathBuf,
    },

    /// Write a library manifest declaring an extension and its dependencies
    ///
    /// Every extension available in a --depends jar is listed in
    /// Extension-List; those of an --optional jar in Optional-Extension-List.
    Manifest {
        /// Where to write the manifest
        #[arg(short, long)]
        out: PathBuf,

        #[command(flatten)]
        extension: ExtensionArgs,

        /// Jar whose extensions are required
        #[arg(long = "depends", value_name = "JAR")]
        depends: Vec<PathBuf>,

        /// Jar whose extensions are optional
        #[arg(long = "optional", value_name = "JAR")]
        optional: Vec<PathBuf>,

        /// Value of the Created-By attribute
        #[arg(long)]
        created_by: Option<String>,
    },
}

/// Extension fields shared by `available` and `manifest`.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionArgs {
    /// Extension name
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub specification_version: Option<String>,

    #[arg(long)]
    pub specification_vendor: Option<String>,

    #[arg(long)]
    pub implementation_version: Option<String>,

    #[arg(long)]
    pub implementation_vendor: Option<String>,

    #[arg(long)]
    pub implementation_vendor_id: Option<String>,

    #[arg(long)]
    pub implementation_url: Option<String>,
}
