//! Resolver that builds the archive by running a command

use std::fmt;
use std::path::PathBuf;
use std::process::Command;

use optpkg_extension::Extension;

use crate::context::ResolveContext;
use crate::error::{Error, Result};
use crate::resolver::ExtensionResolver;

/// Environment variable holding the name of the extension being resolved.
pub const EXTENSION_NAME_ENV: &str = "OPTPKG_EXTENSION_NAME";

/// Runs a shell command (typically a build) and then offers `destfile`.
#[derive(Debug, Clone)]
pub struct CommandResolver {
    command: String,
    dir: Option<PathBuf>,
    destfile: PathBuf,
}

impl CommandResolver {
    pub fn new(command: impl Into<String>, destfile: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            dir: None,
            destfile: destfile.into(),
        }
    }

    /// Run the command in `dir` instead of the context base directory.
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    fn shell(&self) -> Command {
        if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", self.command.as_str()]);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.args(["-c", self.command.as_str()]);
            cmd
        }
    }
}

impl fmt::Display for CommandResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Command[{} ==> {}]", self.command, self.destfile.display())
    }
}

impl ExtensionResolver for CommandResolver {
    fn resolve(&self, extension: &Extension, context: &ResolveContext) -> Result<Option<PathBuf>> {
        if self.command.trim().is_empty() {
            return Err(Error::Resolver {
                resolver: self.to_string(),
                message: "no command specified".to_string(),
            });
        }

        let dir = match &self.dir {
            Some(dir) => context.resolve_path(dir),
            None => context.base_dir().to_path_buf(),
        };
        tracing::info!(command = %self.command, dir = %dir.display(), "running resolver command");

        let status = self
            .shell()
            .current_dir(&dir)
            .env(EXTENSION_NAME_ENV, extension.name())
            .status()
            .map_err(|e| Error::CommandFailed {
                command: self.command.clone(),
                reason: e.to_string(),
            })?;

        if !status.success() {
            return Err(Error::CommandFailed {
                command: self.command.clone(),
                reason: format!("exited with {status}"),
            });
        }

        Ok(Some(context.resolve_path(&self.destfile)))
    }
}
